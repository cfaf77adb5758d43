//! Collaborator traits (ports) - define the interfaces the engine consumes
//!
//! The domain layer states what it needs from the durable score ledger and
//! from the chat platform; infrastructure crates and the embedding
//! application provide the implementations.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::entities::ScoreRecord;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for collaborator operations
pub type CoreResult<T> = Result<T, DomainError>;

// ============================================================================
// Score Store
// ============================================================================

/// Durable (community, user) -> score ledger
///
/// `apply_delta` must be atomic per record: concurrent deltas for the same
/// (community, user) pair never lose an update.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Current score, 0 when no record exists
    async fn get_score(&self, community_id: Snowflake, user_id: Snowflake) -> CoreResult<i64>;

    /// Atomically add `delta` to the record, creating it if absent; returns the new score
    async fn apply_delta(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        delta: i64,
    ) -> CoreResult<i64>;

    /// Overwrite the record with an absolute value (administrative override); returns it
    async fn set_score(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        points: i64,
    ) -> CoreResult<i64>;

    /// Highest scores in a community, descending, at most `limit` records
    async fn top_scores(&self, community_id: Snowflake, limit: i64) -> CoreResult<Vec<ScoreRecord>>;
}

// ============================================================================
// Platform Client
// ============================================================================

/// Chat-platform operations the engine needs for role sync and authorization
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Roles currently assigned to the user in the community
    async fn user_roles(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> CoreResult<HashSet<Snowflake>>;

    /// Assign a role to the user; granting an already-held role is a no-op
    async fn grant_role(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> CoreResult<()>;

    /// Remove a role from the user; revoking an unheld role is a no-op
    async fn revoke_role(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> CoreResult<()>;

    /// Whether the user may perform administrative score adjustments
    async fn has_administrative_capability(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> CoreResult<bool>;
}

//! Role diff - the outcome of one reconciliation pass

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Direction of a single role operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleAction {
    Grant,
    Revoke,
}

/// A role operation that failed during reconciliation
///
/// Failures are collected per role; one failed grant never aborts the rest
/// of the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSyncFailure {
    pub role_id: Snowflake,
    pub action: RoleAction,
    pub reason: String,
}

/// Result of reconciling a user's roles against their score
///
/// `granted` and `revoked` list the operations that succeeded; `failures`
/// lists the ones that did not. An all-empty diff means external state
/// already matched the score-derived desired state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDiff {
    pub granted: Vec<Snowflake>,
    pub revoked: Vec<Snowflake>,
    pub failures: Vec<RoleSyncFailure>,
}

impl RoleDiff {
    /// True when reconciliation had nothing to do and nothing failed
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty() && self.revoked.is_empty() && self.failures.is_empty()
    }

    /// Total number of role operations attempted
    pub fn attempted(&self) -> usize {
        self.granted.len() + self.revoked.len() + self.failures.len()
    }
}

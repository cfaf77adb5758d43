//! Inspection/adjustment handler
//!
//! Implements the "points" command: self-inspection with a cost, free peer
//! inspection, administrative overrides, and the community leaderboard.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use karma_core::{DomainError, ScoreChanged, ScoreRecord, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::sync::RoleSyncDispatcher;

/// Administrative score adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreAdjustment {
    /// Overwrite the target's score
    Set(i64),
    /// Add to the target's score (negative to deduct)
    Delta(i64),
}

/// Outcome of one inspection or adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionOutcome {
    /// Requester looked at their own score; `score` is the pre-cost value,
    /// `balance` what remains after the inspection cost
    SelfInspection { score: i64, balance: i64 },
    /// Requester looked at someone else's score; nothing was mutated
    PeerInspection { score: i64 },
    /// Administrative override applied to the target
    Adjusted { previous: i64, score: i64 },
}

/// Inspection/adjustment handler
pub struct InspectionHandler {
    ctx: Arc<ServiceContext>,
    dispatcher: Arc<RoleSyncDispatcher>,
}

impl InspectionHandler {
    /// Create a new InspectionHandler
    pub fn new(ctx: Arc<ServiceContext>, dispatcher: Arc<RoleSyncDispatcher>) -> Self {
        Self { ctx, dispatcher }
    }

    /// Handle a "points" command invocation
    ///
    /// With an adjustment the requester needs the administrative capability;
    /// without one, inspecting oneself costs points while inspecting a peer
    /// is free.
    #[instrument(skip(self))]
    pub async fn inspect(
        &self,
        community_id: Snowflake,
        requester_id: Snowflake,
        target_id: Snowflake,
        adjustment: Option<ScoreAdjustment>,
    ) -> ServiceResult<InspectionOutcome> {
        let Some(settings) = self.ctx.settings().get(community_id) else {
            return Err(DomainError::ConfigMissing(community_id).into());
        };

        if let Some(adjustment) = adjustment {
            return self.adjust(community_id, requester_id, target_id, adjustment).await;
        }

        if target_id == requester_id {
            return self.inspect_self(community_id, requester_id, settings.inspection_cost).await;
        }

        // Peer inspection is read-only and costs nothing
        let score = self
            .ctx
            .bounded(self.ctx.score_store().get_score(community_id, target_id), || {
                DomainError::StoreUnavailable("get_score timed out".to_string())
            })
            .await?;

        Ok(InspectionOutcome::PeerInspection { score })
    }

    /// Highest scores in the community, read-only
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        community_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<ScoreRecord>> {
        let records = self
            .ctx
            .bounded(self.ctx.score_store().top_scores(community_id, limit), || {
                DomainError::StoreUnavailable("top_scores timed out".to_string())
            })
            .await?;

        Ok(records)
    }

    async fn inspect_self(
        &self,
        community_id: Snowflake,
        requester_id: Snowflake,
        cost: i64,
    ) -> ServiceResult<InspectionOutcome> {
        if cost == 0 {
            let score = self
                .ctx
                .bounded(
                    self.ctx.score_store().get_score(community_id, requester_id),
                    || DomainError::StoreUnavailable("get_score timed out".to_string()),
                )
                .await?;
            return Ok(InspectionOutcome::SelfInspection {
                score,
                balance: score,
            });
        }

        // Charge first; the pre-cost value the user is told about follows
        // from the returned balance. The cost applies even below zero.
        let balance = self
            .ctx
            .apply_delta_serialized(community_id, requester_id, -cost)
            .await?;
        let score = balance + cost;

        info!(user_id = %requester_id, cost, balance, "Self-inspection charged");

        self.dispatcher
            .notify(ScoreChanged::new(community_id, requester_id, balance));

        Ok(InspectionOutcome::SelfInspection { score, balance })
    }

    async fn adjust(
        &self,
        community_id: Snowflake,
        requester_id: Snowflake,
        target_id: Snowflake,
        adjustment: ScoreAdjustment,
    ) -> ServiceResult<InspectionOutcome> {
        let is_admin = self
            .ctx
            .bounded(
                self.ctx
                    .platform()
                    .has_administrative_capability(community_id, requester_id),
                || DomainError::PlatformCallFailed("capability check timed out".to_string()),
            )
            .await?;

        if !is_admin {
            return Err(DomainError::Forbidden.into());
        }

        let (previous, score) = match adjustment {
            ScoreAdjustment::Set(points) => {
                self.ctx
                    .set_score_serialized(community_id, target_id, points)
                    .await?
            }
            ScoreAdjustment::Delta(delta) => {
                let score = self
                    .ctx
                    .apply_delta_serialized(community_id, target_id, delta)
                    .await?;
                (score - delta, score)
            }
        };

        info!(
            requester_id = %requester_id,
            target_id = %target_id,
            previous,
            score,
            "Administrative score adjustment"
        );

        self.dispatcher
            .notify(ScoreChanged::new(community_id, target_id, score));

        Ok(InspectionOutcome::Adjusted { previous, score })
    }
}

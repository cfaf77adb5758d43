//! Membership bonuses
//!
//! Applies the configured join/leave point deltas through the same atomic
//! store path and role-sync flow as reaction processing.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use karma_core::{ScoreChanged, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reaction::ScoreDelta;
use super::sync::RoleSyncDispatcher;

/// Membership bonus service
pub struct MembershipService {
    ctx: Arc<ServiceContext>,
    dispatcher: Arc<RoleSyncDispatcher>,
}

impl MembershipService {
    /// Create a new MembershipService
    pub fn new(ctx: Arc<ServiceContext>, dispatcher: Arc<RoleSyncDispatcher>) -> Self {
        Self { ctx, dispatcher }
    }

    /// A member joined the community
    #[instrument(skip(self))]
    pub async fn on_member_join(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ScoreDelta> {
        let bonus = match self.ctx.settings().get(community_id) {
            Some(settings) => settings.member_join_bonus,
            None => {
                debug!("dropping member-join event for unknown community");
                return Ok(ScoreDelta::Ignored);
            }
        };
        self.apply_bonus(community_id, user_id, bonus, "join").await
    }

    /// A member left the community
    #[instrument(skip(self))]
    pub async fn on_member_leave(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ScoreDelta> {
        let bonus = match self.ctx.settings().get(community_id) {
            Some(settings) => settings.member_leave_bonus,
            None => {
                debug!("dropping member-leave event for unknown community");
                return Ok(ScoreDelta::Ignored);
            }
        };
        self.apply_bonus(community_id, user_id, bonus, "leave").await
    }

    async fn apply_bonus(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        bonus: i64,
        kind: &str,
    ) -> ServiceResult<ScoreDelta> {
        if bonus == 0 {
            return Ok(ScoreDelta::Ignored);
        }

        let new_score = self
            .ctx
            .apply_delta_serialized(community_id, user_id, bonus)
            .await?;

        info!(user_id = %user_id, bonus, new_score, kind, "Membership bonus applied");

        self.dispatcher
            .notify(ScoreChanged::new(community_id, user_id, new_score));

        Ok(ScoreDelta::Applied {
            delta: bonus,
            new_score,
        })
    }
}

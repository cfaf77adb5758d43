//! Engine facade
//!
//! Wires the services to one context and dispatcher and exposes the entry
//! points the gateway collaborator calls.

use std::sync::Arc;

use karma_common::SettingsRegistry;
use karma_core::{PlatformClient, ReactionEvent, ScoreRecord, ScoreStore, Snowflake};

use crate::services::{
    InspectionHandler, InspectionOutcome, MembershipService, ReactionProcessor, RoleReconciler,
    RoleSyncDispatcher, ScoreAdjustment, ScoreDelta, ServiceContext, ServiceResult,
};

/// The assembled reputation engine
///
/// Owns the service context, the coalescing role-sync dispatcher, and the
/// long-lived services. Cheap to share behind an `Arc`.
pub struct KarmaEngine {
    ctx: Arc<ServiceContext>,
    reactions: ReactionProcessor,
    inspections: InspectionHandler,
    membership: MembershipService,
}

impl KarmaEngine {
    /// Assemble the engine from its collaborators
    pub fn new(
        score_store: Arc<dyn ScoreStore>,
        platform: Arc<dyn PlatformClient>,
        settings: Arc<SettingsRegistry>,
    ) -> Self {
        let ctx = Arc::new(ServiceContext::new(score_store, platform, settings));
        let dispatcher = RoleSyncDispatcher::spawn(Arc::clone(&ctx));

        Self {
            reactions: ReactionProcessor::new(Arc::clone(&ctx), Arc::clone(&dispatcher)),
            inspections: InspectionHandler::new(Arc::clone(&ctx), Arc::clone(&dispatcher)),
            membership: MembershipService::new(Arc::clone(&ctx), dispatcher),
            ctx,
        }
    }

    /// Gateway entry point: a reaction was added or removed
    pub async fn on_reaction(&self, event: &ReactionEvent) -> ServiceResult<ScoreDelta> {
        self.reactions.on_reaction(event).await
    }

    /// Gateway entry point: the "points" command
    pub async fn inspect(
        &self,
        community_id: Snowflake,
        requester_id: Snowflake,
        target_id: Snowflake,
        adjustment: Option<ScoreAdjustment>,
    ) -> ServiceResult<InspectionOutcome> {
        self.inspections
            .inspect(community_id, requester_id, target_id, adjustment)
            .await
    }

    /// Gateway entry point: leaderboard query
    pub async fn leaderboard(
        &self,
        community_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<ScoreRecord>> {
        self.inspections.leaderboard(community_id, limit).await
    }

    /// Gateway entry point: a member joined
    pub async fn on_member_join(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ScoreDelta> {
        self.membership.on_member_join(community_id, user_id).await
    }

    /// Gateway entry point: a member left
    pub async fn on_member_leave(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ScoreDelta> {
        self.membership.on_member_leave(community_id, user_id).await
    }

    /// Gateway entry point: a message was deleted, drop its dedup markers
    pub fn forget_message(&self, message_id: Snowflake) {
        self.reactions.forget_message(message_id);
    }

    /// Run one reconciliation immediately, bypassing the dispatcher
    ///
    /// Useful for startup repair after configuration changes.
    pub async fn reconcile_now(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<karma_core::RoleDiff> {
        let score = self
            .ctx
            .score_store()
            .get_score(community_id, user_id)
            .await?;
        RoleReconciler::new(&self.ctx).reconcile(community_id, user_id, score).await
    }

    /// Access the underlying service context
    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }
}

//! Role reconciler
//!
//! Computes the score-derived desired role set and makes the platform's
//! state match it. Only threshold-managed roles are ever touched.

use futures::future::join_all;
use tracing::{info, instrument, warn};

use karma_core::{DomainError, RoleAction, RoleDiff, RoleSyncFailure, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Role reconciler
pub struct RoleReconciler<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleReconciler<'a> {
    /// Create a new RoleReconciler
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reconcile a user's roles against their current score
    ///
    /// Grant/revoke failures are collected per role in the returned diff;
    /// one failed operation never aborts the others. Re-running with an
    /// unchanged score and unchanged external state yields an empty diff.
    #[instrument(skip(self))]
    pub async fn reconcile(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        score: i64,
    ) -> ServiceResult<RoleDiff> {
        let Some(settings) = self.ctx.settings().get(community_id) else {
            return Ok(RoleDiff::default());
        };
        if settings.thresholds.is_empty() {
            // Rank-role feature disabled; no platform calls at all
            return Ok(RoleDiff::default());
        }

        let desired = settings.thresholds.roles_for(score);
        let managed = settings.thresholds.managed_roles();

        let current = self
            .ctx
            .bounded(self.ctx.platform().user_roles(community_id, user_id), || {
                DomainError::PlatformCallFailed("user_roles timed out".to_string())
            })
            .await?;

        let mut operations: Vec<(Snowflake, RoleAction)> = Vec::new();
        for role_id in &desired {
            if !current.contains(role_id) {
                operations.push((*role_id, RoleAction::Grant));
            }
        }
        for role_id in current.intersection(&managed) {
            if !desired.contains(role_id) {
                operations.push((*role_id, RoleAction::Revoke));
            }
        }

        if operations.is_empty() {
            return Ok(RoleDiff::default());
        }

        let results = join_all(
            operations
                .into_iter()
                .map(|(role_id, action)| self.apply_role_op(community_id, user_id, role_id, action)),
        )
        .await;

        let mut diff = RoleDiff::default();
        for (role_id, action, result) in results {
            match result {
                Ok(()) => match action {
                    RoleAction::Grant => diff.granted.push(role_id),
                    RoleAction::Revoke => diff.revoked.push(role_id),
                },
                Err(err) => {
                    warn!(%role_id, ?action, error = %err, "Role operation failed");
                    diff.failures.push(RoleSyncFailure {
                        role_id,
                        action,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            granted = diff.granted.len(),
            revoked = diff.revoked.len(),
            failed = diff.failures.len(),
            "Roles reconciled"
        );

        Ok(diff)
    }

    async fn apply_role_op(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
        action: RoleAction,
    ) -> (Snowflake, RoleAction, karma_core::CoreResult<()>) {
        let timeout_err =
            || DomainError::PlatformCallFailed("role operation timed out".to_string());
        let result = match action {
            RoleAction::Grant => {
                self.ctx
                    .bounded(
                        self.ctx.platform().grant_role(community_id, user_id, role_id),
                        timeout_err,
                    )
                    .await
            }
            RoleAction::Revoke => {
                self.ctx
                    .bounded(
                        self.ctx.platform().revoke_role(community_id, user_id, role_id),
                        timeout_err,
                    )
                    .await
            }
        };
        (role_id, action, result)
    }
}

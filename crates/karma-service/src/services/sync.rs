//! Role-sync dispatcher
//!
//! Coalescing queue between score mutations and reconciliation: only the
//! latest pending score per (community, user) survives a burst, so a flood
//! of reaction events produces a single reconciliation at the final score.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use karma_core::{ScoreChanged, Snowflake};

use super::context::ServiceContext;
use super::reconcile::RoleReconciler;

type RecordKey = (Snowflake, Snowflake);

/// Coalescing role-sync dispatcher
///
/// Dropping the dispatcher closes the queue and lets the worker task finish
/// its remaining keys and exit.
pub struct RoleSyncDispatcher {
    pending: Arc<DashMap<RecordKey, i64>>,
    tx: mpsc::UnboundedSender<RecordKey>,
}

impl RoleSyncDispatcher {
    /// Create the dispatcher and spawn its worker task
    pub fn spawn(ctx: Arc<ServiceContext>) -> Arc<Self> {
        let pending: Arc<DashMap<RecordKey, i64>> = Arc::new(DashMap::new());
        let (tx, mut rx) = mpsc::unbounded_channel::<RecordKey>();

        let worker_pending = Arc::clone(&pending);
        tokio::spawn(async move {
            while let Some(key) = rx.recv().await {
                // A later notification may already have consumed this key;
                // that is the coalescing working as intended.
                let Some((_, score)) = worker_pending.remove(&key) else {
                    continue;
                };

                let (community_id, user_id) = key;
                let reconciler = RoleReconciler::new(&ctx);
                match reconciler.reconcile(community_id, user_id, score).await {
                    Ok(diff) if diff.failures.is_empty() => {
                        debug!(%community_id, %user_id, "Role sync complete");
                    }
                    Ok(diff) => {
                        warn!(
                            %community_id,
                            %user_id,
                            failed = diff.failures.len(),
                            "Role sync finished with failures"
                        );
                    }
                    Err(err) => {
                        // One user's failure never affects another's sync
                        warn!(%community_id, %user_id, error = %err, "Role sync failed");
                    }
                }
            }
        });

        Arc::new(Self { pending, tx })
    }

    /// Record a score change and wake the worker
    ///
    /// Multiple notifications for the same record before the worker runs
    /// collapse into one reconciliation at the latest score.
    pub fn notify(&self, event: ScoreChanged) {
        self.pending.insert(event.key(), event.new_score);
        // Send only fails when the worker is gone, i.e. at shutdown
        let _ = self.tx.send(event.key());
    }

    /// Number of records awaiting reconciliation
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

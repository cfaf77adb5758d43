//! Service context - dependency container for services
//!
//! Holds the collaborator handles and the per-record lock table that
//! serializes read-modify-write cycles on individual score records.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use karma_common::SettingsRegistry;
use karma_core::{CoreResult, DomainError, PlatformClient, ScoreStore, Snowflake};

/// Service context containing all dependencies
///
/// This is the dependency container passed to every service. It provides
/// access to:
/// - The durable score store collaborator
/// - The chat-platform client collaborator
/// - The per-community settings registry
/// - The per-(community, user) lock table
#[derive(Clone)]
pub struct ServiceContext {
    score_store: Arc<dyn ScoreStore>,
    platform: Arc<dyn PlatformClient>,
    settings: Arc<SettingsRegistry>,

    // Units of work for the same record serialize here; different records
    // proceed in parallel. There is no global lock.
    record_locks: Arc<DashMap<(Snowflake, Snowflake), Arc<Mutex<()>>>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        score_store: Arc<dyn ScoreStore>,
        platform: Arc<dyn PlatformClient>,
        settings: Arc<SettingsRegistry>,
    ) -> Self {
        Self {
            score_store,
            platform,
            settings,
            record_locks: Arc::new(DashMap::new()),
        }
    }

    /// Get the score store collaborator
    pub fn score_store(&self) -> &dyn ScoreStore {
        self.score_store.as_ref()
    }

    /// Get the platform client collaborator
    pub fn platform(&self) -> &dyn PlatformClient {
        self.platform.as_ref()
    }

    /// Get the settings registry
    pub fn settings(&self) -> &SettingsRegistry {
        self.settings.as_ref()
    }

    /// Run a collaborator call under the configured timeout
    ///
    /// On timeout the future is dropped and `timeout_err` is returned; the
    /// caller decides on redelivery.
    pub(crate) async fn bounded<T, F>(
        &self,
        fut: F,
        timeout_err: impl FnOnce() -> DomainError,
    ) -> CoreResult<T>
    where
        F: Future<Output = CoreResult<T>>,
    {
        match tokio::time::timeout(self.settings.call_timeout(), fut).await {
            Ok(result) => result,
            Err(_) => Err(timeout_err()),
        }
    }

    /// Lock guarding one (community, user) score record
    fn record_lock(&self, community_id: Snowflake, user_id: Snowflake) -> Arc<Mutex<()>> {
        self.record_locks
            .entry((community_id, user_id))
            .or_default()
            .clone()
    }

    /// Atomically add `delta` to a record, serialized per record
    pub(crate) async fn apply_delta_serialized(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        delta: i64,
    ) -> CoreResult<i64> {
        let lock = self.record_lock(community_id, user_id);
        let _guard = lock.lock().await;

        self.bounded(
            self.score_store.apply_delta(community_id, user_id, delta),
            || DomainError::StoreUnavailable("apply_delta timed out".to_string()),
        )
        .await
    }

    /// Overwrite a record, serialized per record; returns (previous, new)
    pub(crate) async fn set_score_serialized(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        points: i64,
    ) -> CoreResult<(i64, i64)> {
        let lock = self.record_lock(community_id, user_id);
        let _guard = lock.lock().await;

        let previous = self
            .bounded(self.score_store.get_score(community_id, user_id), || {
                DomainError::StoreUnavailable("get_score timed out".to_string())
            })
            .await?;

        let new = self
            .bounded(
                self.score_store.set_score(community_id, user_id, points),
                || DomainError::StoreUnavailable("set_score timed out".to_string()),
            )
            .await?;

        Ok((previous, new))
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("score_store", &"Arc<dyn ScoreStore>")
            .field("platform", &"Arc<dyn PlatformClient>")
            .field("communities", &self.settings.len())
            .field("locked_records", &self.record_locks.len())
            .finish()
    }
}

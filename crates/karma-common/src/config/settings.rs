//! Resolved per-community settings and the hot-reloadable registry
//!
//! Operations never read `PointsConfig` directly; they take an immutable
//! `CommunitySettings` snapshot resolved at dispatch time, so a config
//! reload cannot disturb in-flight work.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use karma_core::{RoleThreshold, Snowflake, ThresholdTable};

use super::app_config::PointsConfig;

/// Immutable snapshot of one community's point settings
#[derive(Debug, Clone)]
pub struct CommunitySettings {
    pub community_id: Snowflake,
    pub upvote_emojis: HashSet<String>,
    pub downvote_emojis: HashSet<String>,
    pub inspection_cost: i64,
    pub member_join_bonus: i64,
    pub member_leave_bonus: i64,
    pub thresholds: ThresholdTable,
}

impl CommunitySettings {
    /// Point delta a reaction with this emoji is worth
    ///
    /// Upvote sets take precedence if an emoji is (mis)configured in both.
    pub fn reaction_delta(&self, emoji: &str) -> i64 {
        if self.upvote_emojis.contains(emoji) {
            1
        } else if self.downvote_emojis.contains(emoji) {
            -1
        } else {
            0
        }
    }
}

/// Registry of per-community settings snapshots
///
/// Lookups hand out `Arc` snapshots; `reload` swaps the whole map so
/// readers holding a snapshot keep working against the old one.
#[derive(Debug)]
pub struct SettingsRegistry {
    communities: RwLock<HashMap<Snowflake, Arc<CommunitySettings>>>,
    call_timeout: RwLock<Duration>,
    marker_ttl: RwLock<Duration>,
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        let points = PointsConfig::default();
        Self {
            communities: RwLock::new(HashMap::new()),
            call_timeout: RwLock::new(Duration::from_millis(points.call_timeout_ms)),
            marker_ttl: RwLock::new(Duration::from_secs(points.marker_ttl_secs)),
        }
    }
}

impl SettingsRegistry {
    /// Build a registry from the points configuration
    pub fn from_config(points: &PointsConfig) -> Self {
        let registry = Self::default();
        registry.reload(points);
        registry
    }

    /// Replace all community snapshots from a freshly loaded configuration
    pub fn reload(&self, points: &PointsConfig) {
        let mut map = HashMap::with_capacity(points.communities.len());

        for community in &points.communities {
            let thresholds = community
                .thresholds
                .iter()
                .map(|t| RoleThreshold::new(t.minimum_score, t.role_id))
                .collect::<ThresholdTable>();

            let settings = CommunitySettings {
                community_id: community.id,
                upvote_emojis: community
                    .upvote_emojis
                    .clone()
                    .unwrap_or_else(|| points.upvote_emojis.clone()),
                downvote_emojis: community
                    .downvote_emojis
                    .clone()
                    .unwrap_or_else(|| points.downvote_emojis.clone()),
                inspection_cost: community.inspection_cost.unwrap_or(points.inspection_cost),
                member_join_bonus: community
                    .member_join_bonus
                    .unwrap_or(points.member_join_bonus),
                member_leave_bonus: community
                    .member_leave_bonus
                    .unwrap_or(points.member_leave_bonus),
                thresholds,
            };

            map.insert(community.id, Arc::new(settings));
        }

        *self.communities.write() = map;
        *self.call_timeout.write() = Duration::from_millis(points.call_timeout_ms);
        *self.marker_ttl.write() = Duration::from_secs(points.marker_ttl_secs);
    }

    /// Settings snapshot for a community, `None` when unknown
    pub fn get(&self, community_id: Snowflake) -> Option<Arc<CommunitySettings>> {
        self.communities.read().get(&community_id).cloned()
    }

    /// Insert or replace a single community snapshot
    pub fn insert(&self, settings: CommunitySettings) {
        self.communities
            .write()
            .insert(settings.community_id, Arc::new(settings));
    }

    /// Bounded timeout for store and platform calls
    pub fn call_timeout(&self) -> Duration {
        *self.call_timeout.read()
    }

    /// Lifetime of counted-reaction markers
    pub fn marker_ttl(&self) -> Duration {
        *self.marker_ttl.read()
    }

    /// Number of configured communities
    pub fn len(&self) -> usize {
        self.communities.read().len()
    }

    /// True when no communities are configured
    pub fn is_empty(&self) -> bool {
        self.communities.read().is_empty()
    }
}

//! Role thresholds - score-gated rank roles per community

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A single score-gated role mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleThreshold {
    pub minimum_score: i64,
    pub role_id: Snowflake,
}

impl RoleThreshold {
    /// Create a new RoleThreshold
    pub fn new(minimum_score: i64, role_id: Snowflake) -> Self {
        Self {
            minimum_score,
            role_id,
        }
    }
}

/// Ordered collection of role thresholds for one community
///
/// Thresholds are kept sorted by `minimum_score` ascending. The table is
/// configuration-owned and read-only to the engine; an empty table means the
/// rank-role feature is disabled for the community.
///
/// Policy: tiers are cumulative. A user at score 50 with tiers at 10/30/50
/// should hold all three roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThresholdTable {
    thresholds: Vec<RoleThreshold>,
}

impl ThresholdTable {
    /// Build a table from an arbitrary list of thresholds
    ///
    /// Sorts by minimum score; duplicate minimums keep their relative order.
    pub fn new(mut thresholds: Vec<RoleThreshold>) -> Self {
        thresholds.sort_by_key(|t| t.minimum_score);
        Self { thresholds }
    }

    /// Number of configured thresholds
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// True when no thresholds are configured (feature disabled)
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Iterate over thresholds in ascending minimum-score order
    pub fn iter(&self) -> impl Iterator<Item = &RoleThreshold> {
        self.thresholds.iter()
    }

    /// Roles the given score entitles the user to (cumulative policy)
    pub fn roles_for(&self, score: i64) -> HashSet<Snowflake> {
        let reached = self.thresholds.partition_point(|t| t.minimum_score <= score);
        self.thresholds[..reached].iter().map(|t| t.role_id).collect()
    }

    /// Every role managed by this table, regardless of score
    ///
    /// Reconciliation only ever touches roles in this set; roles assigned
    /// through other means are left alone.
    pub fn managed_roles(&self) -> HashSet<Snowflake> {
        self.thresholds.iter().map(|t| t.role_id).collect()
    }
}

impl FromIterator<RoleThreshold> for ThresholdTable {
    fn from_iter<I: IntoIterator<Item = RoleThreshold>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

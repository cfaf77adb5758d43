//! Score record entity - per-user reputation within a community

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A user's reputation score within one community
///
/// Scores are signed and unbounded in both directions; the engine never
/// clamps them. A record exists from the first point-affecting event onwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub points: i64,
}

impl ScoreRecord {
    /// Create a new ScoreRecord
    pub fn new(community_id: Snowflake, user_id: Snowflake, points: i64) -> Self {
        Self {
            community_id,
            user_id,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_record_creation() {
        let record = ScoreRecord::new(Snowflake::new(1), Snowflake::new(100), -3);
        assert_eq!(record.community_id, Snowflake::new(1));
        assert_eq!(record.user_id, Snowflake::new(100));
        assert_eq!(record.points, -3);
    }
}

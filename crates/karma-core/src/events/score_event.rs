//! Score events - emitted whenever a user's score changes
//!
//! Consumed by the role-sync dispatcher to drive reconciliation. The event
//! carries the post-mutation score so reconciliation never has to re-read
//! the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Notification that a user's score changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChanged {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub new_score: i64,
    pub occurred_at: DateTime<Utc>,
}

impl ScoreChanged {
    /// Create a new ScoreChanged event stamped with the current time
    pub fn new(community_id: Snowflake, user_id: Snowflake, new_score: i64) -> Self {
        Self {
            community_id,
            user_id,
            new_score,
            occurred_at: Utc::now(),
        }
    }

    /// Coalescing key: one pending reconciliation per (community, user)
    #[inline]
    pub fn key(&self) -> (Snowflake, Snowflake) {
        (self.community_id, self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_key() {
        let ev = ScoreChanged::new(Snowflake::new(1), Snowflake::new(2), 10);
        assert_eq!(ev.key(), (Snowflake::new(1), Snowflake::new(2)));
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let ev = ScoreChanged::new(Snowflake::new(1), Snowflake::new(2), -4);
        let json = serde_json::to_string(&ev).unwrap();
        let back: ScoreChanged = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}

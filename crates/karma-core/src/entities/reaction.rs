//! Reaction event entity - one observed state change on one message

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Whether a reaction was added to or removed from a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionAction {
    Added,
    Removed,
}

/// A single reaction add/remove observed on a message
///
/// Events are ephemeral: they are consumed by the reaction processor and
/// never persisted beyond the deduplication bookkeeping it keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub community_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    pub message_author_id: Snowflake,
    pub reactor_id: Snowflake,
    pub emoji: String,
    pub action: ReactionAction,
}

impl ReactionEvent {
    /// Check whether the reactor is reacting to their own message
    #[inline]
    pub fn is_self_reaction(&self) -> bool {
        self.reactor_id == self.message_author_id
    }

    /// Check if the event uses a specific emoji
    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(author: i64, reactor: i64) -> ReactionEvent {
        ReactionEvent {
            community_id: Snowflake::new(1),
            channel_id: Snowflake::new(2),
            message_id: Snowflake::new(3),
            message_author_id: Snowflake::new(author),
            reactor_id: Snowflake::new(reactor),
            emoji: "👍".to_string(),
            action: ReactionAction::Added,
        }
    }

    #[test]
    fn test_self_reaction_detection() {
        assert!(event(100, 100).is_self_reaction());
        assert!(!event(100, 200).is_self_reaction());
    }

    #[test]
    fn test_is_emoji() {
        let ev = event(100, 200);
        assert!(ev.is_emoji("👍"));
        assert!(!ev.is_emoji("👎"));
    }

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&ReactionAction::Added).unwrap();
        assert_eq!(json, "\"ADDED\"");
        let action: ReactionAction = serde_json::from_str("\"REMOVED\"").unwrap();
        assert_eq!(action, ReactionAction::Removed);
    }
}

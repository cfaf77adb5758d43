//! Reaction event processor
//!
//! Turns reaction add/remove events into idempotent score deltas. The
//! processor owns the transient counted-reaction markers that guarantee a
//! given (message, reactor, emoji) triple contributes at most one net point.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use karma_core::{ReactionAction, ReactionEvent, ScoreChanged, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::sync::RoleSyncDispatcher;

/// Outcome of processing one reaction event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreDelta {
    /// Event acknowledged but no score changed (unknown community, neutral
    /// emoji, self-reaction, duplicate add, removal without a prior add)
    Ignored,
    /// A delta was applied to the message author's record
    Applied { delta: i64, new_score: i64 },
}

impl ScoreDelta {
    /// True when the event changed a score
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Marker key for a counted reaction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CountedReaction {
    message_id: Snowflake,
    reactor_id: Snowflake,
    emoji: String,
}

/// Reaction event processor
pub struct ReactionProcessor {
    ctx: Arc<ServiceContext>,
    dispatcher: Arc<RoleSyncDispatcher>,
    counted: DashMap<CountedReaction, Instant>,
    last_sweep: parking_lot::Mutex<Instant>,
}

impl ReactionProcessor {
    /// Create a new ReactionProcessor
    pub fn new(ctx: Arc<ServiceContext>, dispatcher: Arc<RoleSyncDispatcher>) -> Self {
        Self {
            ctx,
            dispatcher,
            counted: DashMap::new(),
            last_sweep: parking_lot::Mutex::new(Instant::now()),
        }
    }

    /// Process one reaction add/remove event
    ///
    /// Local recoverable conditions are absorbed as `ScoreDelta::Ignored`;
    /// only store failures surface as errors.
    #[instrument(skip(self, event), fields(
        community_id = %event.community_id,
        message_id = %event.message_id,
        reactor_id = %event.reactor_id,
        emoji = %event.emoji,
    ))]
    pub async fn on_reaction(&self, event: &ReactionEvent) -> ServiceResult<ScoreDelta> {
        self.maybe_sweep_markers();

        let Some(settings) = self.ctx.settings().get(event.community_id) else {
            debug!("dropping reaction event for unknown community");
            return Ok(ScoreDelta::Ignored);
        };

        if event.is_self_reaction() {
            return Ok(ScoreDelta::Ignored);
        }

        let base = settings.reaction_delta(&event.emoji);
        if base == 0 {
            return Ok(ScoreDelta::Ignored);
        }

        let key = CountedReaction {
            message_id: event.message_id,
            reactor_id: event.reactor_id,
            emoji: event.emoji.clone(),
        };

        let delta = match event.action {
            ReactionAction::Added => {
                if self.counted.insert(key.clone(), Instant::now()).is_some() {
                    // Already counted; platforms may redeliver adds
                    return Ok(ScoreDelta::Ignored);
                }
                base
            }
            ReactionAction::Removed => {
                if self.counted.remove(&key).is_none() {
                    // No matching prior add; never produce an uncovered negation
                    return Ok(ScoreDelta::Ignored);
                }
                -base
            }
        };

        let applied = self
            .ctx
            .apply_delta_serialized(event.community_id, event.message_author_id, delta)
            .await;

        let new_score = match applied {
            Ok(score) => score,
            Err(err) => {
                // Roll the marker back so a redelivered event is not deduped away
                match event.action {
                    ReactionAction::Added => {
                        self.counted.remove(&key);
                    }
                    ReactionAction::Removed => {
                        self.counted.insert(key, Instant::now());
                    }
                }
                return Err(err.into());
            }
        };

        info!(
            user_id = %event.message_author_id,
            delta,
            new_score,
            "Reaction delta applied"
        );

        self.dispatcher.notify(ScoreChanged::new(
            event.community_id,
            event.message_author_id,
            new_score,
        ));

        Ok(ScoreDelta::Applied { delta, new_score })
    }

    /// Drop every counted marker for a deleted message
    #[instrument(skip(self))]
    pub fn forget_message(&self, message_id: Snowflake) {
        self.counted.retain(|key, _| key.message_id != message_id);
    }

    /// Evict counted markers older than the configured TTL
    pub fn evict_expired_markers(&self) {
        let ttl = self.ctx.settings().marker_ttl();
        self.counted.retain(|_, counted_at| counted_at.elapsed() < ttl);
    }

    /// Number of live counted markers
    pub fn marker_count(&self) -> usize {
        self.counted.len()
    }

    // Opportunistic TTL sweep, at most once per tenth of the TTL so event
    // processing stays O(1) in the common case.
    fn maybe_sweep_markers(&self) {
        let ttl = self.ctx.settings().marker_ttl();
        {
            let mut last = self.last_sweep.lock();
            if last.elapsed() < ttl / 10 {
                return;
            }
            *last = Instant::now();
        }
        self.evict_expired_markers();
    }
}

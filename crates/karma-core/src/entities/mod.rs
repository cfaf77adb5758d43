//! Domain entities

mod reaction;
mod role_diff;
mod score;
mod threshold;

pub use reaction::{ReactionAction, ReactionEvent};
pub use role_diff::{RoleAction, RoleDiff, RoleSyncFailure};
pub use score::ScoreRecord;
pub use threshold::{RoleThreshold, ThresholdTable};

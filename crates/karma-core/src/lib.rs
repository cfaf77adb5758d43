//! # karma-core
//!
//! Domain layer containing entities, value objects, collaborator traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, chat platform, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ReactionAction, ReactionEvent, RoleAction, RoleDiff, RoleSyncFailure, RoleThreshold,
    ScoreRecord, ThresholdTable,
};
pub use error::DomainError;
pub use events::ScoreChanged;
pub use traits::{CoreResult, PlatformClient, ScoreStore};
pub use value_objects::{Snowflake, SnowflakeParseError};

//! Collaborator traits (ports) - interfaces the engine consumes

mod collaborators;

pub use collaborators::{CoreResult, PlatformClient, ScoreStore};

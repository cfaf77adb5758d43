//! Repository implementations
//!
//! PostgreSQL implementation of the `ScoreStore` collaborator trait defined
//! in karma-core, plus schema management for the `scores` table.

mod error;
mod score;

pub use score::{ensure_schema, PgScoreStore};

//! # karma-db
//!
//! Database layer implementing the `ScoreStore` trait with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides the durable score ledger defined in `karma-core`. It
//! handles:
//!
//! - Connection pool management
//! - The `scores` table schema (created idempotently at startup)
//! - An atomic upsert implementation of `apply_delta`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use karma_db::pool::{create_pool, DatabaseConfig};
//! use karma_db::PgScoreStore;
//! use karma_core::ScoreStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     karma_db::ensure_schema(&pool).await?;
//!     let store = PgScoreStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{ensure_schema, PgScoreStore};

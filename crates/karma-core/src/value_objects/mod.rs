//! Value objects used across the domain

mod snowflake;

pub use snowflake::{Snowflake, SnowflakeParseError};

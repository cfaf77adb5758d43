//! Application configuration structs
//!
//! Loads configuration from a config file plus environment overrides.

use std::collections::HashSet;

use serde::Deserialize;

use karma_core::Snowflake;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub points: PointsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Points engine configuration
///
/// Global defaults plus per-community overrides. A community absent from
/// `communities` is unknown to the engine and its events are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    /// Emoji identifiers that award a point
    #[serde(default = "default_upvote_emojis")]
    pub upvote_emojis: HashSet<String>,
    /// Emoji identifiers that deduct a point
    #[serde(default = "default_downvote_emojis")]
    pub downvote_emojis: HashSet<String>,
    /// Points charged for inspecting one's own score
    #[serde(default = "default_inspection_cost")]
    pub inspection_cost: i64,
    /// Points granted when a member joins (0 disables)
    #[serde(default)]
    pub member_join_bonus: i64,
    /// Points applied when a member leaves (0 disables)
    #[serde(default)]
    pub member_leave_bonus: i64,
    /// Upper bound for store and platform calls, in milliseconds
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
    /// How long a counted-reaction marker survives without activity, in seconds
    #[serde(default = "default_marker_ttl_secs")]
    pub marker_ttl_secs: u64,
    /// Communities the engine serves
    #[serde(default)]
    pub communities: Vec<CommunityConfig>,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            upvote_emojis: default_upvote_emojis(),
            downvote_emojis: default_downvote_emojis(),
            inspection_cost: default_inspection_cost(),
            member_join_bonus: 0,
            member_leave_bonus: 0,
            call_timeout_ms: default_call_timeout_ms(),
            marker_ttl_secs: default_marker_ttl_secs(),
            communities: Vec::new(),
        }
    }
}

/// Per-community configuration, overriding the global defaults where set
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityConfig {
    pub id: Snowflake,
    #[serde(default)]
    pub upvote_emojis: Option<HashSet<String>>,
    #[serde(default)]
    pub downvote_emojis: Option<HashSet<String>>,
    #[serde(default)]
    pub inspection_cost: Option<i64>,
    #[serde(default)]
    pub member_join_bonus: Option<i64>,
    #[serde(default)]
    pub member_leave_bonus: Option<i64>,
    /// Score-gated roles; empty disables the rank-role feature
    #[serde(default)]
    pub thresholds: Vec<ThresholdConfig>,
}

/// One score-gated role mapping in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    pub minimum_score: i64,
    pub role_id: Snowflake,
}

// Default value functions
fn default_app_name() -> String {
    "karma-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_upvote_emojis() -> HashSet<String> {
    HashSet::from(["👍".to_string()])
}

fn default_downvote_emojis() -> HashSet<String> {
    HashSet::from(["👎".to_string()])
}

fn default_inspection_cost() -> i64 {
    1
}

fn default_call_timeout_ms() -> u64 {
    5000
}

fn default_marker_ttl_secs() -> u64 {
    // Reaction churn on a message rarely outlives a week; markers older than
    // this are evicted and a late removal becomes a no-op.
    7 * 24 * 3600
}

impl AppConfig {
    /// Load configuration from `karma.toml` (or `$KARMA_CONFIG`) plus
    /// `KARMA__`-prefixed environment overrides
    ///
    /// # Errors
    /// Returns an error if the file cannot be parsed or required values
    /// (currently `database.url`) are missing.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let path = std::env::var("KARMA_CONFIG").unwrap_or_else(|_| "karma.toml".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix("KARMA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_defaults() {
        let points = PointsConfig::default();
        assert!(points.upvote_emojis.contains("👍"));
        assert!(points.downvote_emojis.contains("👎"));
        assert_eq!(points.inspection_cost, 1);
        assert_eq!(points.member_join_bonus, 0);
        assert_eq!(points.call_timeout_ms, 5000);
        assert!(points.communities.is_empty());
    }

    #[test]
    fn test_community_config_deserialization() {
        let points: PointsConfig = serde_json::from_str(
            r#"{
                "inspection_cost": 2,
                "communities": [{
                    "id": "42",
                    "upvote_emojis": ["plusone"],
                    "thresholds": [{"minimum_score": 10, "role_id": "7001"}]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(points.inspection_cost, 2);
        assert_eq!(points.communities.len(), 1);
        let community = &points.communities[0];
        assert_eq!(community.id, Snowflake::new(42));
        assert!(community.upvote_emojis.as_ref().unwrap().contains("plusone"));
        assert_eq!(community.thresholds[0].role_id, Snowflake::new(7001));
    }
}

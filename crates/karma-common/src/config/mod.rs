//! Configuration structs and the per-community settings registry

mod app_config;
mod settings;

pub use app_config::{
    AppConfig, AppSettings, CommunityConfig, ConfigError, DatabaseConfig, Environment,
    PointsConfig, ThresholdConfig,
};
pub use settings::{CommunitySettings, SettingsRegistry};

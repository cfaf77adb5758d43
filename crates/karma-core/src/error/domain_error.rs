//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
///
/// The taxonomy follows the engine's delivery policy: `ConfigMissing` is
/// ignorable (the event is dropped), `StoreUnavailable` is transient and
/// surfaced for caller-level retry, `PlatformCallFailed` is collected per
/// role, and `Forbidden` is a user-visible rejection.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No configuration for community: {0}")]
    ConfigMissing(Snowflake),

    #[error("Score store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Score store returned corrupt data: {0}")]
    StoreCorrupt(String),

    #[error("Platform call failed: {0}")]
    PlatformCallFailed(String),

    #[error("Missing administrative capability")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string for logs and caller-facing reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigMissing(_) => "CONFIG_MISSING",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::StoreCorrupt(_) => "STORE_CORRUPT",
            Self::PlatformCallFailed(_) => "PLATFORM_CALL_FAILED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if the caller may retry the operation (transient condition)
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::PlatformCallFailed(_)
        )
    }

    /// Check if the triggering event can simply be dropped
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::ConfigMissing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::ConfigMissing(Snowflake::new(1));
        assert_eq!(err.code(), "CONFIG_MISSING");

        let err = DomainError::Forbidden;
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn test_is_transient() {
        assert!(DomainError::StoreUnavailable("timeout".to_string()).is_transient());
        assert!(DomainError::PlatformCallFailed("503".to_string()).is_transient());
        assert!(!DomainError::Forbidden.is_transient());
    }

    #[test]
    fn test_is_ignorable() {
        assert!(DomainError::ConfigMissing(Snowflake::new(9)).is_ignorable());
        assert!(!DomainError::StoreUnavailable("down".to_string()).is_ignorable());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ConfigMissing(Snowflake::new(123));
        assert_eq!(err.to_string(), "No configuration for community: 123");
    }
}

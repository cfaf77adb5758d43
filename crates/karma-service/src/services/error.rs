//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use std::fmt;

use karma_core::DomainError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or collaborator failure
    Domain(DomainError),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Internal(_) => None,
        }
    }
}

impl ServiceError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for caller-facing reports
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller may redeliver the triggering event
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_transient())
    }

    /// Whether this is a user-visible authorization rejection
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Forbidden))
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use karma_core::Snowflake;

    #[test]
    fn test_domain_error_code_passthrough() {
        let err = ServiceError::from(DomainError::ConfigMissing(Snowflake::new(1)));
        assert_eq!(err.error_code(), "CONFIG_MISSING");
    }

    #[test]
    fn test_forbidden_detection() {
        assert!(ServiceError::from(DomainError::Forbidden).is_forbidden());
        assert!(!ServiceError::internal("boom").is_forbidden());
    }

    #[test]
    fn test_transient_classification() {
        let err = ServiceError::from(DomainError::StoreUnavailable("timeout".to_string()));
        assert!(err.is_transient());
        assert!(!ServiceError::from(DomainError::Forbidden).is_transient());
    }
}

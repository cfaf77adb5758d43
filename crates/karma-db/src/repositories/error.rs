//! Error handling utilities for repositories

use karma_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Pool, connection, and IO failures are transient store unavailability;
/// decode failures mean the table holds something we cannot interpret.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::ColumnDecode { .. } | SqlxError::Decode(_) | SqlxError::TypeNotFound { .. } => {
            DomainError::StoreCorrupt(e.to_string())
        }
        _ => DomainError::StoreUnavailable(e.to_string()),
    }
}

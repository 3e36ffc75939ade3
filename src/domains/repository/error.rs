//! Repository-specific error types.

use thiserror::Error;

use crate::core::error::ErrorKind;

/// Errors that can occur while reading or writing prompt records.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The database rejected or failed the operation.
    #[error("Database error during {operation}: {message}")]
    Database { operation: String, message: String },

    /// A record failed validation before reaching the database.
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl RepositoryError {
    /// Create a new database error for `operation`.
    pub fn database(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Database {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a new input validation error.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The error kind reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Database { .. } => ErrorKind::DbError,
            Self::InvalidInput { .. } => ErrorKind::ValidationFailed,
        }
    }

    /// HTTP-flavored status of this error.
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_kind() {
        let err = RepositoryError::database("list_templates", "no such table");
        assert_eq!(err.kind(), ErrorKind::DbError);
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_string(),
            "Database error during list_templates: no such table"
        );
    }

    #[test]
    fn test_invalid_input_is_client_error() {
        let err = RepositoryError::invalid_input("name", "must not be blank");
        assert_eq!(err.status_code(), 400);
    }
}

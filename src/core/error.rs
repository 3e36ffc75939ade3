//! Error types and handling for the prompt server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, plus the [`ErrorKind`] taxonomy
//! shared by every domain error so callers can branch on a stable code and an
//! HTTP-flavored status.

use serde::Serialize;
use thiserror::Error;

/// A specialized Result type for prompt server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Stable error codes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing or malformed input. Recoverable by the caller.
    ValidationFailed,
    /// No builder is registered for the requested prompt type.
    BuilderNotFound,
    /// A builder failed unexpectedly or returned an unusable shape.
    PromptConstructionError,
    /// The database backend rejected or failed an operation.
    DbError,
    /// A named entity (tool, record) does not exist.
    NotFound,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// The wire code, e.g. `VALIDATION_FAILED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::BuilderNotFound => "BUILDER_NOT_FOUND",
            Self::PromptConstructionError => "PROMPT_CONSTRUCTION_ERROR",
            Self::DbError => "DB_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
        }
    }

    /// HTTP status associated with this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ValidationFailed => 400,
            Self::BuilderNotFound | Self::NotFound => 404,
            Self::PromptConstructionError | Self::DbError | Self::Internal => 500,
        }
    }

    /// Whether the caller can fix the failure by changing its input.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the prompt server.
///
/// This enum captures all possible error conditions that can occur during
/// server operation, including domain-specific errors and external failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// Error originating from the prompt repository.
    #[error("Repository error: {0}")]
    Repository(#[from] crate::domains::repository::RepositoryError),

    /// The transport failed to bind or the MCP session broke.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The error kind, delegating to the domain error where there is one.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Tool(e) => e.kind(),
            Self::Prompt(e) => e.kind(),
            Self::Repository(e) => e.kind(),
            Self::Json(_) => ErrorKind::ValidationFailed,
            Self::Transport(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// HTTP-flavored status of this error.
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

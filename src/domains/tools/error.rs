//! Tool-specific error types.

use thiserror::Error;

use crate::core::error::ErrorKind;
use crate::domains::prompts::PromptError;
use crate::domains::repository::RepositoryError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A stored record the tool operates on does not exist.
    #[error("{entity} not found: {id}")]
    RecordNotFound { entity: &'static str, id: String },

    /// Building a prompt failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The prompt repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "record not found" error.
    pub fn record_not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The error kind reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::RecordNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArguments(_) => ErrorKind::ValidationFailed,
            Self::Prompt(e) => e.kind(),
            Self::Repository(e) => e.kind(),
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// HTTP-flavored status of this error.
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

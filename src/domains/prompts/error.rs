//! Prompt-specific error types.

use thiserror::Error;

use crate::core::error::ErrorKind;

/// Errors that can occur while validating params or building prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Params are missing a required field or have the wrong shape.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// No builder is registered under the requested prompt type.
    #[error("No prompt builder registered for type '{0}'")]
    BuilderNotFound(String),

    /// Building the prompt failed for a reason other than bad input.
    #[error("Failed to construct '{prompt_type}' prompt: {message}")]
    Construction {
        prompt_type: String,
        message: String,
    },

    /// The prompt type key is not part of the catalog.
    #[error("Unknown prompt type: {0}")]
    UnknownType(String),
}

impl PromptError {
    /// Create a new validation error for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new "builder not found" error.
    pub fn builder_not_found(prompt_type: impl Into<String>) -> Self {
        Self::BuilderNotFound(prompt_type.into())
    }

    /// Create a new construction error.
    pub fn construction(prompt_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            prompt_type: prompt_type.into(),
            message: message.into(),
        }
    }

    /// Create a new "unknown type" error.
    pub fn unknown_type(key: impl Into<String>) -> Self {
        Self::UnknownType(key.into())
    }

    /// The error kind reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::ValidationFailed,
            Self::BuilderNotFound(_) => ErrorKind::BuilderNotFound,
            Self::Construction { .. } => ErrorKind::PromptConstructionError,
            Self::UnknownType(_) => ErrorKind::ValidationFailed,
        }
    }

    /// HTTP-flavored status of this error.
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Validation errors keep their 400 semantics when a builder fails.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Wrap any non-validation error into a construction error for `prompt_type`.
    pub fn into_construction(self, prompt_type: &str) -> Self {
        match self {
            Self::Validation { .. } | Self::Construction { .. } => self,
            other => Self::construction(prompt_type, other.to_string()),
        }
    }
}

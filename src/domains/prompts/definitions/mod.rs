//! Prompt definitions module.
//!
//! Each prompt type is defined in its own file with:
//! - Typed params and the top-level fields it requires
//! - MCP argument metadata
//! - The renderer producing the system and user messages
//!
//! ## Adding a New Prompt
//!
//! 1. Add a variant to `PromptType`
//! 2. Create a new file (e.g., `my_prompt.rs`) implementing `PromptDefinition`
//! 3. Export it here
//! 4. Register in `registry.rs`

use rmcp::model::PromptArgument;
use serde::de::DeserializeOwned;

use super::error::PromptError;
use super::types::PromptType;
use super::validation::RequiredField;

mod challenge;
mod difficulty_calibration;
mod evaluation;
mod focus_area;
mod personality;
mod progress;

pub use challenge::{ChallengeParameters, ChallengeParams, ChallengePrompt};
pub use difficulty_calibration::{DifficultyCalibrationParams, DifficultyCalibrationPrompt};
pub use evaluation::{EvaluationParams, EvaluationPrompt};
pub use focus_area::{FocusAreaParams, FocusAreaPrompt};
pub use personality::{PersonalityParams, PersonalityPrompt};
pub use progress::{ProgressParams, ProgressPrompt};

/// System and user message produced by a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// Trait for prompt definitions.
///
/// Each prompt type implements this trait to provide its metadata and renderer.
pub trait PromptDefinition: 'static {
    /// The prompt type this definition renders.
    const PROMPT_TYPE: PromptType;

    /// Typed params, deserialized after the required-field check.
    type Params: DeserializeOwned;

    /// Top-level fields that must be present.
    fn required_fields() -> &'static [RequiredField];

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;

    /// Render the system and user messages.
    fn render(params: &Self::Params) -> Result<RenderedPrompt, PromptError>;
}

/// Shorthand for a described MCP argument.
pub(crate) fn argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(required),
    }
}

//! Prompt building tools.
//!
//! - `build`: build a prompt for a given type and params
//! - `types`: list the registered prompt types

pub mod build;
pub mod types;

pub use build::{BuildPromptParams, BuildPromptTool};
pub use types::{ListPromptTypesParams, ListPromptTypesTool};

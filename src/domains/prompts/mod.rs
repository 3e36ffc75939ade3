//! Prompts domain module.
//!
//! This module builds the prompts sent to the assessment model. Each prompt
//! type turns a loosely-typed JSON params object into an `{input,
//! instructions}` pair suitable for a Responses-style LLM API.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual prompt definitions (one file per prompt type)
//! - `registry.rs` - Builder registration and dispatch
//! - `builder.rs` - The builder trait and its adapters
//! - `responses.rs` - Result shape and legacy-shape normalization
//! - `service.rs` - Prompt service shared by MCP prompts and tools
//! - `types.rs` - Prompt type catalog (models and output formats)
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file in `definitions/` (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`
//!
//! **No need to modify `service.rs`!**

pub mod builder;
pub mod definitions;
mod error;
pub mod formats;
mod lenient;
pub mod models;
mod registry;
pub mod responses;
mod sections;
mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{FnBuilder, PromptBuilder};
pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use registry::{PromptBuilderRegistry, default_builders};
pub use responses::{BuilderOutput, PromptInput, PromptResult, format_for_responses_api};
pub use service::{PreparedPrompt, PromptService, PromptTypeInfo};
pub use types::{ModelCatalog, OutputFormat, PromptType};

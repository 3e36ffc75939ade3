//! Prompt template tools.
//!
//! CRUD over the templates stored in the prompt repository.

pub mod delete;
pub mod get;
pub mod list;
pub mod save;
pub mod update;

pub use delete::{DeletePromptTemplateParams, DeletePromptTemplateTool};
pub use get::{GetPromptTemplateParams, GetPromptTemplateTool};
pub use list::{ListPromptTemplatesParams, ListPromptTemplatesTool};
pub use save::SavePromptTemplateTool;
pub use update::{UpdatePromptTemplateParams, UpdatePromptTemplateTool};

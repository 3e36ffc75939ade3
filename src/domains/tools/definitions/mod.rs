//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod history;
pub mod prompt;
pub mod template;

pub use history::{ListPromptHistoryParams, ListPromptHistoryTool, RecordPromptUsageTool};
pub use prompt::{BuildPromptParams, BuildPromptTool, ListPromptTypesParams, ListPromptTypesTool};
pub use template::{
    DeletePromptTemplateParams, DeletePromptTemplateTool, GetPromptTemplateParams,
    GetPromptTemplateTool, ListPromptTemplatesParams, ListPromptTemplatesTool,
    SavePromptTemplateTool, UpdatePromptTemplateParams, UpdatePromptTemplateTool,
};

//! Prompt usage history tools.

pub mod list;
pub mod record;

pub use list::{ListPromptHistoryParams, ListPromptHistoryTool};
pub use record::RecordPromptUsageTool;

//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use rmcp::model::Tool;

use crate::core::context::AppContext;

#[cfg(feature = "http")]
use super::error::ToolError;
#[cfg(feature = "http")]
use tracing::warn;

use super::definitions::{
    BuildPromptTool, DeletePromptTemplateTool, GetPromptTemplateTool, ListPromptHistoryTool,
    ListPromptTemplatesTool, ListPromptTypesTool, RecordPromptUsageTool, SavePromptTemplateTool,
    UpdatePromptTemplateTool,
};

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    ctx: AppContext,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Shared services the tools run against.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            BuildPromptTool::NAME,
            ListPromptTypesTool::NAME,
            SavePromptTemplateTool::NAME,
            GetPromptTemplateTool::NAME,
            ListPromptTemplatesTool::NAME,
            UpdatePromptTemplateTool::NAME,
            DeletePromptTemplateTool::NAME,
            RecordPromptUsageTool::NAME,
            ListPromptHistoryTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            BuildPromptTool::to_tool(),
            ListPromptTypesTool::to_tool(),
            SavePromptTemplateTool::to_tool(),
            GetPromptTemplateTool::to_tool(),
            ListPromptTemplatesTool::to_tool(),
            UpdatePromptTemplateTool::to_tool(),
            DeletePromptTemplateTool::to_tool(),
            RecordPromptUsageTool::to_tool(),
            ListPromptHistoryTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let ctx = self.ctx.clone();
        match name {
            BuildPromptTool::NAME => BuildPromptTool::http_handler(arguments, ctx).await,
            ListPromptTypesTool::NAME => ListPromptTypesTool::http_handler(arguments, ctx).await,
            SavePromptTemplateTool::NAME => {
                SavePromptTemplateTool::http_handler(arguments, ctx).await
            }
            GetPromptTemplateTool::NAME => GetPromptTemplateTool::http_handler(arguments, ctx).await,
            ListPromptTemplatesTool::NAME => {
                ListPromptTemplatesTool::http_handler(arguments, ctx).await
            }
            UpdatePromptTemplateTool::NAME => {
                UpdatePromptTemplateTool::http_handler(arguments, ctx).await
            }
            DeletePromptTemplateTool::NAME => {
                DeletePromptTemplateTool::http_handler(arguments, ctx).await
            }
            RecordPromptUsageTool::NAME => RecordPromptUsageTool::http_handler(arguments, ctx).await,
            ListPromptHistoryTool::NAME => ListPromptHistoryTool::http_handler(arguments, ctx).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

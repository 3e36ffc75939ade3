//! Tool Router - builds the rmcp ToolRouter from registry.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use rmcp::handler::server::tool::ToolRouter;

use crate::core::context::AppContext;

use super::definitions::{
    BuildPromptTool, DeletePromptTemplateTool, GetPromptTemplateTool, ListPromptHistoryTool,
    ListPromptTemplatesTool, ListPromptTypesTool, RecordPromptUsageTool, SavePromptTemplateTool,
    UpdatePromptTemplateTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(ctx: AppContext) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(BuildPromptTool::create_route(ctx.clone()))
        .with_route(ListPromptTypesTool::create_route(ctx.clone()))
        .with_route(SavePromptTemplateTool::create_route(ctx.clone()))
        .with_route(GetPromptTemplateTool::create_route(ctx.clone()))
        .with_route(ListPromptTemplatesTool::create_route(ctx.clone()))
        .with_route(UpdatePromptTemplateTool::create_route(ctx.clone()))
        .with_route(DeletePromptTemplateTool::create_route(ctx.clone()))
        .with_route(RecordPromptUsageTool::create_route(ctx.clone()))
        .with_route(ListPromptHistoryTool::create_route(ctx))
}

//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the prompt service and the tools.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, instrument};

use super::config::Config;
use super::context::AppContext;
use crate::domains::prompts::PromptError;
use crate::domains::tools::build_tool_router;

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

pub(crate) const INSTRUCTIONS: &str = "Builds prompts for an AI-assisted human-skills assessment app \
    (challenges, evaluations, personality insights, progress analysis, focus areas and \
    difficulty calibration) and stores reusable prompt templates and usage history. Use \
    list_prompt_types to discover prompt types, then build_prompt or prompts/get.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the prompt service and the tools to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Shared services (config, prompt service, repository).
    ctx: AppContext,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server around an application context.
    pub fn new(ctx: AppContext) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(ctx.clone()),
            ctx,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.ctx.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.ctx.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Config {
        &self.ctx.config
    }

    /// Get the shared application context.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// This method uses the ToolRegistry to dispatch to the appropriate
    /// tool handler. Each tool's http_handler is defined in its own file
    /// under `domains/tools/definitions/`.
    #[cfg(feature = "http")]
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let registry = ToolRegistry::new(self.ctx.clone());
        registry.call_tool(name, arguments).await
    }

    /// List all available prompts (for HTTP transport).
    pub async fn list_prompts(&self) -> Vec<Value> {
        let prompts = self.ctx.prompts.list_prompts().await;

        prompts
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Get a prompt by name (for HTTP transport).
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<Value, PromptError> {
        let args = arguments.and_then(|v| v.as_object().cloned().map(stringify_arguments));

        let result = self.ctx.prompts.get_prompt(name, args).await?;
        Ok(serde_json::json!({
            "description": result.description,
            "messages": result.messages
        }))
    }
}

/// MCP prompt arguments are strings; non-string JSON values are passed
/// through in their serialized form.
fn stringify_arguments(map: serde_json::Map<String, Value>) -> HashMap<String, String> {
    map.into_iter()
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, text)
        })
        .collect()
}

/// Map a prompt failure to the matching MCP error.
fn prompt_error_to_mcp(error: PromptError) -> McpError {
    let message = format!("{}: {}", error.kind(), error);
    if error.kind().is_client_error() {
        McpError::invalid_params(message, None)
    } else {
        McpError::internal_error(message, None)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.ctx.prompts.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.map(stringify_arguments);
        self.ctx
            .prompts
            .get_prompt(&request.name, arguments)
            .await
            .map_err(prompt_error_to_mcp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_server_info() {
        let server = McpServer::new(AppContext::in_memory().await);
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_none());
        assert_eq!(server.name(), "assessment-prompt-server");
    }

    #[tokio::test]
    async fn test_list_tools_and_prompts() {
        let server = McpServer::new(AppContext::in_memory().await);
        assert_eq!(server.list_tools().len(), 9);
        assert_eq!(server.list_prompts().await.len(), 6);
    }

    #[tokio::test]
    async fn test_get_prompt_accepts_json_arguments() {
        let server = McpServer::new(AppContext::in_memory().await);
        let result = server
            .get_prompt(
                "progress",
                Some(json!({
                    "user": {"fullName": "Ada"},
                    "challengeHistory": [{"title": "A", "score": 90}],
                    "timeframe": "last week"
                })),
            )
            .await
            .unwrap();
        let messages = result["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test]
    async fn test_get_prompt_numeric_answer_stays_text() {
        let server = McpServer::new(AppContext::in_memory().await);
        let result = server
            .get_prompt(
                "evaluation",
                Some(json!({"challenge": {"title": "Guess"}, "userResponse": 42})),
            )
            .await
            .unwrap();
        assert!(result["messages"].to_string().contains("42"));
    }

    #[tokio::test]
    async fn test_get_prompt_validation_error() {
        let server = McpServer::new(AppContext::in_memory().await);
        let err = server.get_prompt("progress", None).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_prompt_errors_map_to_mcp_codes() {
        let err = prompt_error_to_mcp(PromptError::validation("user", "is required"));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.starts_with("VALIDATION_FAILED"));

        let err = prompt_error_to_mcp(PromptError::construction("challenge", "bad shape"));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn test_stringify_arguments() {
        let map = json!({"userResponse": "text", "count": 4, "user": {"a": 1}});
        let args = stringify_arguments(map.as_object().unwrap().clone());
        assert_eq!(args["userResponse"], "text");
        assert_eq!(args["count"], "4");
        assert_eq!(args["user"], r#"{"a":1}"#);
    }
}

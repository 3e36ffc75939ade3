//! Common utilities shared across tools.
//!
//! Argument parsing, structured results and error formatting. Every tool
//! reports failures as an MCP error result whose text starts with the error
//! kind, e.g. `VALIDATION_FAILED: ...`.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::tools::ToolError;

/// Default number of rows returned by listing tools.
pub fn default_limit() -> u32 {
    20
}

/// Clamp a listing limit to 1-100.
pub fn validate_limit(limit: u32) -> u32 {
    limit.clamp(1, 100)
}

/// Deserialize HTTP tool arguments into the tool's params.
pub fn parse_arguments<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Text summary plus the serialized value as structured content.
pub fn structured_result<T: Serialize>(
    summary: impl Into<String>,
    value: &T,
) -> Result<CallToolResult, ToolError> {
    let structured = serde_json::to_value(value).map_err(|e| ToolError::internal(e.to_string()))?;

    Ok(CallToolResult {
        content: vec![Content::text(summary.into())],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    })
}

/// Turn a tool failure into an MCP error result.
pub fn error_result(error: &ToolError) -> CallToolResult {
    warn!(kind = %error.kind(), "Tool failed: {}", error);
    CallToolResult::error(vec![Content::text(format!("{}: {}", error.kind(), error))])
}

/// Collapse a tool outcome into the result sent to the client.
pub fn into_call_result(outcome: Result<CallToolResult, ToolError>) -> CallToolResult {
    outcome.unwrap_or_else(|e| error_result(&e))
}

/// Serialize a result for the HTTP transport.
#[cfg(feature = "http")]
pub fn to_http_value(result: &CallToolResult) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
}

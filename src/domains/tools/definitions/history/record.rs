//! Record prompt usage tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::context::AppContext;
use crate::domains::repository::{NewHistoryEntry, PromptHistoryEntry};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{into_call_result, structured_result};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Record prompt usage tool - appends one row to the usage history.
pub struct RecordPromptUsageTool;

impl RecordPromptUsageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "record_prompt_usage";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Record that a prompt was sent to the model: the \
        rendered content, the variables and context used, and optionally the model's result.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(template_id = ?params.template_id))]
    pub async fn execute(params: NewHistoryEntry, ctx: &AppContext) -> CallToolResult {
        info!("Record usage tool called");
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(params: NewHistoryEntry, ctx: &AppContext) -> Result<CallToolResult, ToolError> {
        let entry = ctx.repository.record_usage(params).await?;
        structured_result(format!("Recorded prompt usage {}", entry.id), &entry)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, ctx: AppContext) -> Result<Value, ToolError> {
        let params: NewHistoryEntry = parse_arguments(arguments)?;
        let result = Self::execute(params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<NewHistoryEntry>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<PromptHistoryEntry>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(ctx: AppContext) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |tool_ctx: ToolCallContext<'_, S>| {
            let args = tool_ctx.arguments.clone().unwrap_or_default();
            let ctx = ctx.clone();
            async move {
                let params: NewHistoryEntry = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(params, &ctx).await)
            }
            .boxed()
        })
    }
}

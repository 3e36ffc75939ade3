//! List prompt history tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::core::context::AppContext;
use crate::domains::repository::PromptHistoryEntry;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    default_limit, into_call_result, structured_result, validate_limit,
};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Parameters for the list prompt history tool. Exactly one of
/// `template_id` or `user_email`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPromptHistoryParams {
    /// History of this template.
    #[serde(default)]
    pub template_id: Option<String>,

    /// History of this user.
    #[serde(default)]
    pub user_email: Option<String>,

    /// Maximum number of entries, newest first (1-100, default 20).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Listed history entries.
#[derive(Debug, Serialize, JsonSchema)]
pub struct HistoryList {
    pub count: usize,
    pub entries: Vec<PromptHistoryEntry>,
}

/// List prompt history tool.
pub struct ListPromptHistoryTool;

impl ListPromptHistoryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_prompt_history";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List recorded prompt usage, newest first, for a \
        template (template_id) or for a user (user_email).";

    /// Execute the tool logic.
    pub async fn execute(params: &ListPromptHistoryParams, ctx: &AppContext) -> CallToolResult {
        info!("List history tool called: {:?}", params);
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(
        params: &ListPromptHistoryParams,
        ctx: &AppContext,
    ) -> Result<CallToolResult, ToolError> {
        let limit = Some(validate_limit(params.limit));
        let (entries, subject) = match (&params.template_id, &params.user_email) {
            (Some(template_id), None) => (
                ctx.repository.get_history(template_id, limit).await?,
                format!("template {}", template_id),
            ),
            (None, Some(email)) => (
                ctx.repository.get_user_history(email, limit).await?,
                format!("user {}", email),
            ),
            _ => {
                return Err(ToolError::invalid_arguments(
                    "Provide exactly one of 'template_id' or 'user_email'",
                ));
            }
        };

        structured_result(
            format!("{} history entries for {}", entries.len(), subject),
            &HistoryList {
                count: entries.len(),
                entries,
            },
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, ctx: AppContext) -> Result<Value, ToolError> {
        let params: ListPromptHistoryParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ListPromptHistoryParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<HistoryList>().into()),
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
                let params: ListPromptHistoryParams = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

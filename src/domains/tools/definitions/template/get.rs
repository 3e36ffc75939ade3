//! Get prompt template tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::core::context::AppContext;
use crate::domains::repository::PromptTemplate;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{into_call_result, structured_result};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Parameters for the get prompt template tool. Exactly one of `id` or `name`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetPromptTemplateParams {
    /// Template id.
    #[serde(default)]
    pub id: Option<String>,

    /// Template name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Get prompt template tool.
pub struct GetPromptTemplateTool;

impl GetPromptTemplateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_prompt_template";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Fetch a stored prompt template by id or by name.";

    /// Execute the tool logic.
    pub async fn execute(params: &GetPromptTemplateParams, ctx: &AppContext) -> CallToolResult {
        info!("Get template tool called: {:?}", params);
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(
        params: &GetPromptTemplateParams,
        ctx: &AppContext,
    ) -> Result<CallToolResult, ToolError> {
        let (found, key) = match (&params.id, &params.name) {
            (Some(id), None) => (ctx.repository.get_template(id).await?, id),
            (None, Some(name)) => (ctx.repository.get_template_by_name(name).await?, name),
            _ => {
                return Err(ToolError::invalid_arguments(
                    "Provide exactly one of 'id' or 'name'",
                ));
            }
        };

        let template = found.ok_or_else(|| ToolError::record_not_found("Template", key))?;
        structured_result(
            format!("Template '{}' ({})", template.name, template.id),
            &template,
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, ctx: AppContext) -> Result<Value, ToolError> {
        let params: GetPromptTemplateParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetPromptTemplateParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<PromptTemplate>().into()),
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
                let params: GetPromptTemplateParams = serde_json::from_value(Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

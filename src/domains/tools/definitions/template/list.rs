//! List prompt templates tool definition.

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
use crate::domains::repository::{PromptTemplate, TemplateFilter};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    default_limit, into_call_result, structured_result, validate_limit,
};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Parameters for the list prompt templates tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPromptTemplatesParams {
    /// Only templates in this category.
    #[serde(default)]
    pub category: Option<String>,

    /// Only templates for this domain.
    #[serde(default)]
    pub domain: Option<String>,

    /// Maximum number of templates (1-100, default 20).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Listed templates.
#[derive(Debug, Serialize, JsonSchema)]
pub struct TemplateList {
    pub count: usize,
    pub templates: Vec<PromptTemplate>,
}

/// List prompt templates tool.
pub struct ListPromptTemplatesTool;

impl ListPromptTemplatesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_prompt_templates";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List stored prompt templates ordered by name, \
        optionally filtered by category and domain.";

    /// Execute the tool logic.
    pub async fn execute(params: &ListPromptTemplatesParams, ctx: &AppContext) -> CallToolResult {
        info!("List templates tool called: {:?}", params);
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(
        params: &ListPromptTemplatesParams,
        ctx: &AppContext,
    ) -> Result<CallToolResult, ToolError> {
        let filter = TemplateFilter {
            category: params.category.clone(),
            domain: params.domain.clone(),
            limit: Some(validate_limit(params.limit)),
        };
        let templates = ctx.repository.list_templates(&filter).await?;

        let summary = if templates.is_empty() {
            "No templates found".to_string()
        } else {
            format!(
                "Found {} templates: {}",
                templates.len(),
                templates
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        structured_result(
            summary,
            &TemplateList {
                count: templates.len(),
                templates,
            },
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, ctx: AppContext) -> Result<Value, ToolError> {
        let params: ListPromptTemplatesParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ListPromptTemplatesParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<TemplateList>().into()),
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
                let params: ListPromptTemplatesParams =
                    serde_json::from_value(Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

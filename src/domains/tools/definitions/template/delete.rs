//! Delete prompt template tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::context::AppContext;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{into_call_result, structured_result};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Parameters for the delete prompt template tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeletePromptTemplateParams {
    /// Id of the template to delete.
    pub id: String,
}

/// Result of a delete operation
#[derive(Debug, Serialize, JsonSchema)]
struct DeleteResult {
    /// Id that was deleted
    id: String,
    /// Whether a template was removed
    deleted: bool,
}

/// Delete prompt template tool.
///
/// History rows that referenced the template are kept with their
/// template reference cleared.
pub struct DeletePromptTemplateTool;

impl DeletePromptTemplateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_prompt_template";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete a stored prompt template by id. Usage history \
        for the template is kept.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = %params.id))]
    pub async fn execute(params: &DeletePromptTemplateParams, ctx: &AppContext) -> CallToolResult {
        info!("Delete template tool called: '{}'", params.id);
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(
        params: &DeletePromptTemplateParams,
        ctx: &AppContext,
    ) -> Result<CallToolResult, ToolError> {
        if !ctx.repository.delete_template(&params.id).await? {
            return Err(ToolError::record_not_found("Template", &params.id));
        }

        info!("Deleted template {}", params.id);
        structured_result(
            format!("Deleted template {}", params.id),
            &DeleteResult {
                id: params.id.clone(),
                deleted: true,
            },
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, ctx: AppContext) -> Result<Value, ToolError> {
        let params: DeletePromptTemplateParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DeletePromptTemplateParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<DeleteResult>().into()),
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
                let params: DeletePromptTemplateParams =
                    serde_json::from_value(Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &ctx).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::repository::NewPromptTemplate;
    use crate::domains::tools::definitions::common::test_helpers::{is_error, result_text};

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let ctx = AppContext::in_memory().await;
        let template = ctx
            .repository
            .create_template(NewPromptTemplate {
                name: "grader".into(),
                content: "body".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let params = DeletePromptTemplateParams {
            id: template.id.clone(),
        };

        let result = DeletePromptTemplateTool::execute(&params, &ctx).await;
        assert!(!is_error(&result));
        assert_eq!(result.structured_content.unwrap()["deleted"], true);

        let result = DeletePromptTemplateTool::execute(&params, &ctx).await;
        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("NOT_FOUND"));
    }
}

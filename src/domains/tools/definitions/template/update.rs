//! Update prompt template tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::context::AppContext;
use crate::domains::repository::{PromptTemplate, TemplatePatch};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{into_call_result, structured_result};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Parameters for the update prompt template tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdatePromptTemplateParams {
    /// Id of the template to change.
    pub id: String,

    /// Fields to change. Omitted fields keep their value.
    #[serde(flatten)]
    pub patch: TemplatePatch,
}

/// Update prompt template tool - partial update of a stored template.
pub struct UpdatePromptTemplateTool;

impl UpdatePromptTemplateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_prompt_template";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update a stored prompt template. Only the provided \
        fields (name, content, category, domain, variables) are changed; pass null for category or \
        domain to clear it.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = %params.id))]
    pub async fn execute(params: UpdatePromptTemplateParams, ctx: &AppContext) -> CallToolResult {
        info!("Update template tool called: '{}'", params.id);
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(
        params: UpdatePromptTemplateParams,
        ctx: &AppContext,
    ) -> Result<CallToolResult, ToolError> {
        if params.patch.is_empty() {
            return Err(ToolError::invalid_arguments("Nothing to update"));
        }

        let template = ctx
            .repository
            .update_template(&params.id, params.patch)
            .await?
            .ok_or_else(|| ToolError::record_not_found("Template", &params.id))?;

        structured_result(
            format!("Updated template '{}' ({})", template.name, template.id),
            &template,
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, ctx: AppContext) -> Result<Value, ToolError> {
        let params: UpdatePromptTemplateParams = parse_arguments(arguments)?;
        let result = Self::execute(params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<UpdatePromptTemplateParams>().into(),
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
                let params: UpdatePromptTemplateParams =
                    serde_json::from_value(Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(params, &ctx).await)
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
    use serde_json::json;

    #[tokio::test]
    async fn test_partial_update() {
        let ctx = AppContext::in_memory().await;
        let template = ctx
            .repository
            .create_template(NewPromptTemplate {
                name: "grader".into(),
                content: "Evaluate {answer}".into(),
                domain: Some("ethics".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let params: UpdatePromptTemplateParams = serde_json::from_value(json!({
            "id": template.id,
            "content": "Grade {answer} strictly"
        }))
        .unwrap();
        let result = UpdatePromptTemplateTool::execute(params, &ctx).await;

        assert!(!is_error(&result));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["content"], "Grade {answer} strictly");
        assert_eq!(structured["domain"], "ethics");
    }

    #[tokio::test]
    async fn test_null_clears_domain() {
        let ctx = AppContext::in_memory().await;
        let template = ctx
            .repository
            .create_template(NewPromptTemplate {
                name: "grader".into(),
                content: "Evaluate {answer}".into(),
                category: Some("evaluation".into()),
                domain: Some("ethics".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let params: UpdatePromptTemplateParams =
            serde_json::from_value(json!({"id": template.id, "domain": null})).unwrap();
        let result = UpdatePromptTemplateTool::execute(params, &ctx).await;

        assert!(!is_error(&result));
        let structured = result.structured_content.unwrap();
        assert!(structured["domain"].is_null());
        assert_eq!(structured["category"], "evaluation");
    }

    #[tokio::test]
    async fn test_update_missing_template() {
        let ctx = AppContext::in_memory().await;
        let params: UpdatePromptTemplateParams =
            serde_json::from_value(json!({"id": "missing", "name": "x"})).unwrap();
        let result = UpdatePromptTemplateTool::execute(params, &ctx).await;
        assert!(result_text(&result).starts_with("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_empty_update_rejected() {
        let ctx = AppContext::in_memory().await;
        let params: UpdatePromptTemplateParams =
            serde_json::from_value(json!({"id": "any"})).unwrap();
        let result = UpdatePromptTemplateTool::execute(params, &ctx).await;
        assert_eq!(result_text(&result), "VALIDATION_FAILED: Invalid arguments: Nothing to update");
    }
}

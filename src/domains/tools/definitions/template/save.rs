//! Save prompt template tool definition.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::core::context::AppContext;
use crate::domains::repository::{NewPromptTemplate, PromptTemplate};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{into_call_result, structured_result};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Save prompt template tool - stores a new named template.
pub struct SavePromptTemplateTool;

impl SavePromptTemplateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "save_prompt_template";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Save a new prompt template. Names are unique; \
        variables lists the placeholder names used in the content.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(name = %params.name))]
    pub async fn execute(params: NewPromptTemplate, ctx: &AppContext) -> CallToolResult {
        info!("Save template tool called: '{}'", params.name);
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(params: NewPromptTemplate, ctx: &AppContext) -> Result<CallToolResult, ToolError> {
        let template = ctx.repository.create_template(params).await?;
        info!("Saved template '{}' ({})", template.name, template.id);

        structured_result(
            format!("Saved template '{}' with id {}", template.name, template.id),
            &template,
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, ctx: AppContext) -> Result<Value, ToolError> {
        let params: NewPromptTemplate = parse_arguments(arguments)?;
        let result = Self::execute(params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<NewPromptTemplate>().into(),
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
                let params: NewPromptTemplate = serde_json::from_value(Value::Object(args))
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
    use crate::domains::tools::definitions::common::test_helpers::{is_error, result_text};

    fn template(name: &str) -> NewPromptTemplate {
        NewPromptTemplate {
            name: name.to_string(),
            content: "Evaluate {answer}".to_string(),
            category: Some("evaluation".to_string()),
            domain: None,
            variables: vec!["answer".to_string()],
        }
    }

    #[tokio::test]
    async fn test_save_template() {
        let ctx = AppContext::in_memory().await;
        let result = SavePromptTemplateTool::execute(template("grader"), &ctx).await;

        assert!(!is_error(&result));
        assert!(result_text(&result).contains("Saved template 'grader'"));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["variables"], serde_json::json!(["answer"]));

        let id = structured["id"].as_str().unwrap();
        assert!(ctx.repository.get_template(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_duplicate_reports_db_error() {
        let ctx = AppContext::in_memory().await;
        SavePromptTemplateTool::execute(template("grader"), &ctx).await;
        let result = SavePromptTemplateTool::execute(template("grader"), &ctx).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("DB_ERROR"));
    }

    #[tokio::test]
    async fn test_save_blank_content_is_validation_failure() {
        let ctx = AppContext::in_memory().await;
        let mut params = template("grader");
        params.content = "   ".to_string();
        let result = SavePromptTemplateTool::execute(params, &ctx).await;

        assert!(result_text(&result).starts_with("VALIDATION_FAILED"));
    }
}

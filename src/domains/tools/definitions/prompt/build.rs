//! Build prompt tool definition.
//!
//! Builds the `{input, instructions}` pair for a prompt type and attaches the
//! recommended model and output format.

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
use crate::domains::prompts::PreparedPrompt;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{into_call_result, structured_result};

#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::{parse_arguments, to_http_value};

/// Parameters for the build prompt tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildPromptParams {
    /// Prompt type, e.g. "challenge" or "difficulty-calibration" (case-insensitive).
    pub prompt_type: String,

    /// Builder params as a JSON object. Required fields depend on the prompt type.
    #[serde(default = "empty_object")]
    pub params: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

/// Build prompt tool.
pub struct BuildPromptTool;

impl BuildPromptTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "build_prompt";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Build a prompt for an LLM Responses API call. Returns \
        the input, the system instructions, the recommended model and the expected output format. \
        Use list_prompt_types to see the available types and their required params.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(prompt_type = %params.prompt_type))]
    pub async fn execute(params: &BuildPromptParams, ctx: &AppContext) -> CallToolResult {
        info!("Build prompt tool called: '{}'", params.prompt_type);
        into_call_result(Self::run(params, ctx).await)
    }

    async fn run(params: &BuildPromptParams, ctx: &AppContext) -> Result<CallToolResult, ToolError> {
        let prepared = ctx
            .prompts
            .prepare(&params.prompt_type, &params.params)
            .await?;

        let summary = format!(
            "Built '{}' prompt for {} ({} characters of input{})",
            prepared.prompt_type,
            prepared.model,
            prepared.input.joined().len(),
            if prepared.instructions.is_some() {
                ", with instructions"
            } else {
                ""
            }
        );

        structured_result(summary, &prepared)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: Value,
        ctx: AppContext,
    ) -> Result<Value, ToolError> {
        let params: BuildPromptParams = parse_arguments(arguments)?;
        let result = Self::execute(&params, &ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<BuildPromptParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<PreparedPrompt>().into()),
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
                let params: BuildPromptParams = serde_json::from_value(Value::Object(args))
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
    use crate::domains::tools::definitions::common::test_helpers::{is_error, result_text};
    use serde_json::json;

    fn params(prompt_type: &str, params: Value) -> BuildPromptParams {
        BuildPromptParams {
            prompt_type: prompt_type.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_build_evaluation_prompt() {
        let ctx = AppContext::in_memory().await;
        let result = BuildPromptTool::execute(
            &params(
                "evaluation",
                json!({
                    "challenge": {"title": "Ethics dilemma", "content": "Decide what to do"},
                    "userResponse": "I would ask for more context"
                }),
            ),
            &ctx,
        )
        .await;

        assert!(!is_error(&result));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["prompt_type"], "evaluation");
        assert_eq!(structured["model"], "gpt-4o");
        assert_eq!(structured["text_format"]["format"], "json_object");
        assert!(structured["instructions"].is_string());
    }

    #[tokio::test]
    async fn test_missing_required_field() {
        let ctx = AppContext::in_memory().await;
        let result =
            BuildPromptTool::execute(&params("evaluation", json!({"challenge": {}})), &ctx).await;
        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("VALIDATION_FAILED"));
        assert!(result_text(&result).contains("userResponse"));
    }

    #[tokio::test]
    async fn test_unknown_prompt_type() {
        let ctx = AppContext::in_memory().await;
        let result = BuildPromptTool::execute(&params("nonexistent-type", json!({})), &ctx).await;
        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("BUILDER_NOT_FOUND"));
    }

    #[test]
    fn test_params_default_to_empty_object() {
        let params: BuildPromptParams =
            serde_json::from_value(json!({"prompt_type": "challenge"})).unwrap();
        assert_eq!(params.params, json!({}));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_build_http_handler_missing_param() {
        let ctx = AppContext::in_memory().await;
        let result = BuildPromptTool::http_handler(json!({"params": {}}), ctx).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}

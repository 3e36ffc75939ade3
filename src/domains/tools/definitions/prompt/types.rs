//! List prompt types tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::context::AppContext;
use crate::domains::prompts::PromptTypeInfo;
use crate::domains::tools::definitions::common::{into_call_result, structured_result};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;
#[cfg(feature = "http")]
use crate::domains::tools::definitions::common::to_http_value;

/// Parameters for the list prompt types tool (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListPromptTypesParams {}

/// Catalog of registered prompt types.
#[derive(Debug, Serialize, JsonSchema)]
pub struct PromptTypeCatalog {
    pub prompt_types: Vec<PromptTypeInfo>,
}

/// List prompt types tool.
pub struct ListPromptTypesTool;

impl ListPromptTypesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_prompt_types";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List the registered prompt types with their \
        description, recommended model, output format and required params.";

    /// Execute the tool logic.
    pub async fn execute(ctx: &AppContext) -> CallToolResult {
        info!("List prompt types tool called");

        let catalog = PromptTypeCatalog {
            prompt_types: ctx.prompts.prompt_types().await,
        };
        let summary = catalog
            .prompt_types
            .iter()
            .map(|t| format!("{} ({})", t.prompt_type, t.model))
            .collect::<Vec<_>>()
            .join(", ");

        into_call_result(structured_result(
            format!("{} prompt types: {}", catalog.prompt_types.len(), summary),
            &catalog,
        ))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        _arguments: serde_json::Value,
        ctx: AppContext,
    ) -> Result<serde_json::Value, ToolError> {
        let result = Self::execute(&ctx).await;
        to_http_value(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ListPromptTypesParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<PromptTypeCatalog>().into()),
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
        ToolRoute::new_dyn(Self::to_tool(), move |_tool_ctx: ToolCallContext<'_, S>| {
            let ctx = ctx.clone();
            async move { Ok(Self::execute(&ctx).await) }.boxed()
        })
    }
}

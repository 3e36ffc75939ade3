//! Prompt service implementation.
//!
//! The PromptService owns the builder registry and the model catalog. It is
//! the entry point for building prompts, both for MCP prompt requests and for
//! the `build_prompt` tool.
//!
//! Builders are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new prompt does NOT require modifying this file.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::builder::PromptBuilder;
use super::error::PromptError;
use super::registry::PromptBuilderRegistry;
use super::responses::{BuilderOutput, PromptInput, PromptResult};
use super::types::{ModelCatalog, OutputFormat, normalize_key};
use super::validation::{FieldKind, RequiredField};
use crate::core::config::PromptsConfig;

/// A built prompt plus everything needed to call the provider.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PreparedPrompt {
    pub prompt_type: String,
    pub model: String,
    pub input: PromptInput,
    pub instructions: Option<String>,
    pub text_format: OutputFormat,
}

/// Catalog entry for a registered prompt type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PromptTypeInfo {
    pub prompt_type: String,
    pub description: Option<String>,
    pub model: String,
    pub output_format: OutputFormat,
    pub required_arguments: Vec<String>,
}

/// Service for building prompts.
pub struct PromptService {
    /// Model and output format lookup.
    catalog: ModelCatalog,

    /// Registry of prompt builders.
    /// Key: lowercased prompt type, Value: builder
    registry: RwLock<PromptBuilderRegistry>,
}

impl PromptService {
    /// Create a new PromptService with the given configuration.
    pub fn new(config: PromptsConfig) -> Self {
        info!("Initializing PromptService");

        Self {
            catalog: ModelCatalog::new(&config),
            registry: RwLock::new(PromptBuilderRegistry::new()),
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Build the `{input, instructions}` pair for `prompt_type`.
    #[instrument(skip(self, params))]
    pub async fn build_prompt(
        &self,
        prompt_type: &str,
        params: &Value,
    ) -> Result<PromptResult, PromptError> {
        let result = self.registry.read().await.build(prompt_type, params)?;
        debug!("Built '{}' prompt", normalize_key(prompt_type));
        Ok(result)
    }

    /// Build a prompt and attach the recommended model and output format.
    pub async fn prepare(
        &self,
        prompt_type: &str,
        params: &Value,
    ) -> Result<PreparedPrompt, PromptError> {
        let result = self.build_prompt(prompt_type, params).await?;
        let key = normalize_key(prompt_type);

        Ok(PreparedPrompt {
            model: self.catalog.model_for(&key).to_string(),
            text_format: self.catalog.output_format_for(&key),
            prompt_type: key,
            input: result.input,
            instructions: result.instructions,
        })
    }

    /// Register a closure builder.
    pub async fn register_builder<F>(&self, prompt_type: &str, f: F)
    where
        F: Fn(&Value) -> Result<BuilderOutput, PromptError> + Send + Sync + 'static,
    {
        self.registry.write().await.register(prompt_type, f);
    }

    /// Register a builder object.
    pub async fn register_instance(&self, prompt_type: &str, builder: Arc<dyn PromptBuilder>) {
        self.registry
            .write()
            .await
            .register_instance(prompt_type, builder);
    }

    /// Restore the default builders.
    pub async fn reset(&self) {
        info!("Resetting prompt builder registry");
        self.registry.write().await.reset();
    }

    /// Every registered prompt type with its model and format.
    pub async fn prompt_types(&self) -> Vec<PromptTypeInfo> {
        let registry = self.registry.read().await;
        registry
            .registered_types()
            .into_iter()
            .filter_map(|key| {
                let builder = registry.get(&key).ok()?;
                Some(PromptTypeInfo {
                    description: builder.description().map(str::to_string),
                    model: self.catalog.model_for(&key).to_string(),
                    output_format: self.catalog.output_format_for(&key),
                    required_arguments: builder
                        .arguments()
                        .into_iter()
                        .filter(|a| a.required == Some(true))
                        .map(|a| a.name)
                        .collect(),
                    prompt_type: key,
                })
            })
            .collect()
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        let registry = self.registry.read().await;
        registry
            .registered_types()
            .into_iter()
            .filter_map(|key| {
                let builder = registry.get(&key).ok()?;
                Some(Prompt {
                    name: key,
                    title: None,
                    description: builder.description().map(str::to_string),
                    arguments: Some(builder.arguments()),
                    icons: None,
                    meta: None,
                })
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    ///
    /// MCP arguments are strings. Values holding a JSON object or array are
    /// decoded so nested params can be passed through, unless the prompt
    /// requires that field to be a string. Scalars stay strings and are
    /// coerced by the typed params where a number is expected.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let (description, required) = {
            let registry = self.registry.read().await;
            let builder = registry.get(name)?;
            (
                builder.description().map(str::to_string),
                builder.required_fields(),
            )
        };
        let params = Value::Object(decode_arguments(arguments.unwrap_or_default(), required));

        let result = self.build_prompt(name, &params).await?;

        let mut messages = Vec::new();
        if let Some(instructions) = result.instructions {
            messages.push(PromptMessage::new_text(
                PromptMessageRole::User,
                instructions,
            ));
        }
        match result.input {
            PromptInput::Text(text) => {
                messages.push(PromptMessage::new_text(PromptMessageRole::User, text));
            }
            PromptInput::Messages(turns) => {
                messages.extend(
                    turns
                        .into_iter()
                        .map(|turn| PromptMessage::new_text(PromptMessageRole::User, turn)),
                );
            }
        }

        Ok(GetPromptResult {
            description,
            messages,
        })
    }
}

fn decode_arguments(
    arguments: HashMap<String, String>,
    required: &[RequiredField],
) -> Map<String, Value> {
    arguments
        .into_iter()
        .map(|(key, raw)| {
            let wants_string = required
                .iter()
                .any(|field| field.name == key && field.kind == FieldKind::String);
            let value = if wants_string {
                Value::String(raw)
            } else {
                match serde_json::from_str::<Value>(&raw) {
                    Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
                    _ => Value::String(raw),
                }
            };
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::domains::prompts::test_support::valid_params;
    use crate::domains::prompts::types::{FormatKind, PromptType};
    use serde_json::json;

    fn service() -> PromptService {
        PromptService::new(PromptsConfig::default())
    }

    #[tokio::test]
    async fn test_prompt_service_creation() {
        let prompts = service().list_prompts().await;
        assert_eq!(prompts.len(), PromptType::ALL.len());
        assert!(prompts.iter().all(|p| p.arguments.as_ref().is_some_and(|a| !a.is_empty())));
    }

    #[tokio::test]
    async fn test_build_every_type() {
        let service = service();
        for prompt_type in PromptType::ALL {
            let result = service
                .build_prompt(prompt_type.as_str(), &valid_params(prompt_type))
                .await
                .unwrap();
            assert!(!result.input.is_empty());
        }
    }

    #[tokio::test]
    async fn test_build_nonexistent_type() {
        let err = service()
            .build_prompt("nonexistent-type", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BuilderNotFound);
    }

    #[tokio::test]
    async fn test_prepare_attaches_model_and_format() {
        let prepared = service()
            .prepare("Evaluation", &valid_params(PromptType::Evaluation))
            .await
            .unwrap();
        assert_eq!(prepared.prompt_type, "evaluation");
        assert_eq!(prepared.model, "gpt-4o");
        assert_eq!(prepared.text_format.format, FormatKind::JsonObject);
        assert!(prepared.instructions.is_some());
    }

    #[tokio::test]
    async fn test_register_and_reset() {
        let service = service();
        service
            .register_builder("shout", |params: &Value| {
                Ok(json!({"content": params["text"].as_str().unwrap_or("").to_uppercase()}).into())
            })
            .await;

        let prepared = service.prepare("shout", &json!({"text": "hi"})).await.unwrap();
        assert_eq!(prepared.input, PromptInput::Text("HI".into()));
        assert_eq!(prepared.text_format, OutputFormat::text());

        service.reset().await;
        assert!(service.build_prompt("shout", &json!({})).await.is_err());
        assert!(
            service
                .build_prompt("progress", &valid_params(PromptType::Progress))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_prompt_types_catalog() {
        let types = service().prompt_types().await;
        let calibration = types
            .iter()
            .find(|t| t.prompt_type == "difficulty-calibration")
            .unwrap();
        assert_eq!(calibration.model, "gpt-4o-mini");
        assert_eq!(
            calibration.required_arguments,
            vec!["challenges", "difficultyLevels"]
        );
    }

    #[tokio::test]
    async fn test_get_prompt_decodes_json_arguments() {
        let mut args = HashMap::new();
        args.insert(
            "challenges".to_string(),
            r#"[{"id": "c1"}, {"id": "c2"}, {"id": "c3"}]"#.to_string(),
        );
        args.insert("difficultyLevels".to_string(), r#"["easy"]"#.to_string());

        let result = service()
            .get_prompt("difficulty-calibration", Some(args))
            .await
            .unwrap();
        assert_eq!(result.messages.len(), 2);
        assert!(result.description.is_some());
    }

    #[tokio::test]
    async fn test_get_prompt_missing_required_argument() {
        let err = service().get_prompt("evaluation", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let result = service().get_prompt("nonexistent", None).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_arguments_keeps_scalars_as_strings() {
        let mut args = HashMap::new();
        args.insert("userResponse".to_string(), "[1, 2]".to_string());
        args.insert("count".to_string(), "5".to_string());
        args.insert("flag".to_string(), "true".to_string());
        args.insert("quoted".to_string(), "\"x\"".to_string());
        args.insert("levels".to_string(), r#"["easy"]"#.to_string());

        let decoded = decode_arguments(args, &[RequiredField::string("userResponse")]);
        assert_eq!(decoded["userResponse"], "[1, 2]");
        assert_eq!(decoded["count"], "5");
        assert_eq!(decoded["flag"], "true");
        assert_eq!(decoded["quoted"], "\"x\"");
        assert_eq!(decoded["levels"], json!(["easy"]));
    }

    #[tokio::test]
    async fn test_get_prompt_with_numeric_looking_answer() {
        for answer in ["42", "true", "[\"a\"]"] {
            let mut args = HashMap::new();
            args.insert("challenge".to_string(), r#"{"title": "Guess"}"#.to_string());
            args.insert("userResponse".to_string(), answer.to_string());

            let result = service().get_prompt("evaluation", Some(args)).await;
            assert!(result.is_ok(), "answer {}: {:?}", answer, result.err());
        }
    }

    #[tokio::test]
    async fn test_get_prompt_coerces_numeric_string_arguments() {
        let mut args = HashMap::new();
        args.insert("user".to_string(), r#"{"focusAreas": ["Design"]}"#.to_string());
        args.insert("count".to_string(), "4".to_string());

        let result = service().get_prompt("focus-area", Some(args)).await.unwrap();
        let text = serde_json::to_string(&result.messages).unwrap();
        assert!(text.contains("Recommend 4 focus areas"));
    }

    #[test]
    fn test_build_outside_async_context() {
        let service = service();
        let result = tokio_test::block_on(
            service.build_prompt("focus-area", &valid_params(PromptType::FocusArea)),
        )
        .unwrap();
        assert!(result.input.joined().contains("Recommend 3 focus areas"));
    }
}

//! Responses-API prompt shapes.
//!
//! Builders hand back an `{input, instructions}` pair: `instructions` is the
//! system message and `input` the user turn. Older builders returned other
//! shapes, so everything coming out of a builder goes through [`normalize`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::PromptError;

/// User input for a Responses-API request: a single string or a list of turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PromptInput {
    Text(String),
    Messages(Vec<String>),
}

impl PromptInput {
    /// Whether there is no usable input text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Messages(messages) => messages.iter().all(|m| m.trim().is_empty()),
        }
    }

    /// All input text joined into one string.
    pub fn joined(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Messages(messages) => messages.join("\n\n"),
        }
    }
}

impl From<String> for PromptInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for PromptInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A rendered prompt ready for the LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PromptResult {
    pub input: PromptInput,
    pub instructions: Option<String>,
}

/// Wrap a user and a system message as a Responses-API pair.
///
/// A blank system message becomes `instructions: None`.
pub fn format_for_responses_api(
    user_message: impl Into<String>,
    system_message: impl Into<String>,
) -> PromptResult {
    let system_message = system_message.into();
    PromptResult {
        input: PromptInput::Text(user_message.into()),
        instructions: if system_message.trim().is_empty() {
            None
        } else {
            Some(system_message)
        },
    }
}

/// What a builder may return before normalization.
#[derive(Debug, Clone)]
pub enum BuilderOutput {
    /// Already in `{input, instructions}` form.
    Responses(PromptResult),
    /// A bare prompt string with no system message.
    Text(String),
    /// An untyped value from a legacy builder.
    Legacy(Value),
}

impl From<PromptResult> for BuilderOutput {
    fn from(result: PromptResult) -> Self {
        Self::Responses(result)
    }
}

impl From<String> for BuilderOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for BuilderOutput {
    fn from(value: Value) -> Self {
        Self::Legacy(value)
    }
}

/// Convert any builder output into the canonical [`PromptResult`].
pub fn normalize(prompt_type: &str, output: BuilderOutput) -> Result<PromptResult, PromptError> {
    match output {
        BuilderOutput::Responses(result) => Ok(result),
        BuilderOutput::Text(text) => Ok(PromptResult {
            input: PromptInput::Text(text),
            instructions: None,
        }),
        BuilderOutput::Legacy(value) => normalize_value(prompt_type, value),
    }
}

fn normalize_value(prompt_type: &str, value: Value) -> Result<PromptResult, PromptError> {
    let object = match value {
        Value::String(text) => {
            return Ok(PromptResult {
                input: PromptInput::Text(text),
                instructions: None,
            });
        }
        Value::Object(object) => object,
        other => {
            return Err(PromptError::construction(
                prompt_type,
                format!("unrecognized builder output of type {}", json_type(&other)),
            ));
        }
    };

    // Responses-API shape
    if let Some(input) = object.get("input") {
        let input = match input {
            Value::String(text) => PromptInput::Text(text.clone()),
            Value::Array(items) => PromptInput::Messages(
                items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            PromptError::construction(
                                prompt_type,
                                "'input' array must contain only strings",
                            )
                        })
                    })
                    .collect::<Result<_, _>>()?,
            ),
            other => {
                return Err(PromptError::construction(
                    prompt_type,
                    format!("'input' must be a string or array, got {}", json_type(other)),
                ));
            }
        };
        let instructions = optional_string(prompt_type, &object, &["instructions"])?;
        return Ok(PromptResult {
            input,
            instructions,
        });
    }

    // {prompt|content, systemMessage|system}
    let prompt_field = ["prompt", "content"]
        .into_iter()
        .find(|key| object.contains_key(*key));
    if let Some(key) = prompt_field {
        let prompt = object[key].as_str().ok_or_else(|| {
            PromptError::construction(
                prompt_type,
                format!("'{}' must be a string, got {}", key, json_type(&object[key])),
            )
        })?;
        let instructions = optional_string(prompt_type, &object, &["systemMessage", "system"])?;
        return Ok(PromptResult {
            input: PromptInput::Text(prompt.to_string()),
            instructions,
        });
    }

    Err(PromptError::construction(
        prompt_type,
        "unrecognized builder output: expected 'input', 'prompt' or 'content'",
    ))
}

/// First present key among `keys`, which must be a string or null.
fn optional_string(
    prompt_type: &str,
    object: &serde_json::Map<String, Value>,
    keys: &[&str],
) -> Result<Option<String>, PromptError> {
    for key in keys {
        match object.get(*key) {
            None => continue,
            Some(Value::Null) => return Ok(None),
            Some(Value::String(text)) => return Ok(Some(text.clone())),
            Some(other) => {
                return Err(PromptError::construction(
                    prompt_type,
                    format!("'{}' must be a string or null, got {}", key, json_type(other)),
                ));
            }
        }
    }
    Ok(None)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

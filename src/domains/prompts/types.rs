//! Prompt type catalog.
//!
//! Maps each symbolic prompt type to the model it is tuned for and the output
//! format the provider should be asked for.

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use super::error::PromptError;
use super::formats::{
    ChallengeResponse, DifficultyCalibrationResponse, EvaluationResponse, FocusAreaResponse,
    PersonalityInsightsResponse, ProgressAnalysisResponse,
};
use crate::core::config::PromptsConfig;

/// Model used when nothing more specific is known.
pub const FALLBACK_MODEL: &str = "gpt-4o";

/// Every prompt type this server knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PromptType {
    Challenge,
    Evaluation,
    Personality,
    Progress,
    FocusArea,
    DifficultyCalibration,
}

impl PromptType {
    pub const ALL: [PromptType; 6] = [
        Self::Challenge,
        Self::Evaluation,
        Self::Personality,
        Self::Progress,
        Self::FocusArea,
        Self::DifficultyCalibration,
    ];

    /// The registry key, e.g. `difficulty-calibration`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Challenge => "challenge",
            Self::Evaluation => "evaluation",
            Self::Personality => "personality",
            Self::Progress => "progress",
            Self::FocusArea => "focus-area",
            Self::DifficultyCalibration => "difficulty-calibration",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Challenge => "Generate a personalized assessment challenge",
            Self::Evaluation => "Evaluate a user's response to a challenge",
            Self::Personality => "Derive insights from personality traits and AI attitudes",
            Self::Progress => "Analyze progress across completed challenges",
            Self::FocusArea => "Recommend focus areas for upcoming challenges",
            Self::DifficultyCalibration => "Calibrate challenge difficulty to the user's level",
        }
    }

    /// Model this prompt type is tuned for.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Challenge | Self::Evaluation | Self::Personality | Self::Progress => "gpt-4o",
            Self::FocusArea | Self::DifficultyCalibration => "gpt-4o-mini",
        }
    }

    /// Structured output format expected back from the provider.
    pub fn output_format(&self) -> OutputFormat {
        match self {
            Self::Challenge => OutputFormat::json::<ChallengeResponse>(),
            Self::Evaluation => OutputFormat::json::<EvaluationResponse>(),
            Self::Personality => OutputFormat::json::<PersonalityInsightsResponse>(),
            Self::Progress => OutputFormat::json::<ProgressAnalysisResponse>(),
            Self::FocusArea => OutputFormat::json::<FocusAreaResponse>(),
            Self::DifficultyCalibration => OutputFormat::json::<DifficultyCalibrationResponse>(),
        }
    }
}

impl std::fmt::Display for PromptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptType {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| PromptError::unknown_type(s))
    }
}

/// Registry keys are case-insensitive and ignore surrounding whitespace.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Kind of output requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    JsonObject,
    Text,
}

/// Output-format descriptor: a kind plus an optional JSON Schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutputFormat {
    pub format: FormatKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl OutputFormat {
    /// Free-form text.
    pub fn text() -> Self {
        Self {
            format: FormatKind::Text,
            schema: None,
        }
    }

    /// JSON matching the schema of `T`.
    pub fn json<T: JsonSchema>() -> Self {
        Self {
            format: FormatKind::JsonObject,
            schema: serde_json::to_value(schema_for!(T)).ok(),
        }
    }
}

/// Model and format lookup by prompt type key.
///
/// Unknown keys never fail: they fall back to the configured default model
/// and free-form text.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    default_model: String,
    overrides: HashMap<String, String>,
}

impl ModelCatalog {
    pub fn new(config: &PromptsConfig) -> Self {
        Self {
            default_model: config.default_model.clone(),
            overrides: config
                .model_overrides
                .iter()
                .map(|(k, v)| (normalize_key(k), v.clone()))
                .collect(),
        }
    }

    /// Recommended model for a prompt type key.
    pub fn model_for(&self, key: &str) -> &str {
        let key = normalize_key(key);
        if let Some(model) = self.overrides.get(&key) {
            return model;
        }
        match key.parse::<PromptType>() {
            Ok(prompt_type) => prompt_type.default_model(),
            Err(_) => &self.default_model,
        }
    }

    /// Output format for a prompt type key.
    pub fn output_format_for(&self, key: &str) -> OutputFormat {
        key.parse::<PromptType>()
            .map(|t| t.output_format())
            .unwrap_or_else(|_| OutputFormat::text())
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(&PromptsConfig::default())
    }
}

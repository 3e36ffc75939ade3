//! Prompt Registry - central registration of all prompt builders.
//!
//! This module provides dynamic builder registration and dispatch.
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `default_builders()`

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::builder::{DefinitionBuilder, FnBuilder, PromptBuilder};
use super::definitions::{
    ChallengePrompt, DifficultyCalibrationPrompt, EvaluationPrompt, FocusAreaPrompt,
    PersonalityPrompt, PromptDefinition, ProgressPrompt,
};
use super::error::PromptError;
use super::responses::{BuilderOutput, PromptResult, normalize};
use super::types::normalize_key;

fn entry<P: PromptDefinition>() -> (&'static str, Arc<dyn PromptBuilder>) {
    let builder: Arc<dyn PromptBuilder> = Arc::new(DefinitionBuilder::<P>::new());
    (P::PROMPT_TYPE.as_str(), builder)
}

/// The fixed registration list every registry starts from.
pub fn default_builders() -> Vec<(&'static str, Arc<dyn PromptBuilder>)> {
    vec![
        entry::<ChallengePrompt>(),
        entry::<EvaluationPrompt>(),
        entry::<PersonalityPrompt>(),
        entry::<ProgressPrompt>(),
        entry::<FocusAreaPrompt>(),
        entry::<DifficultyCalibrationPrompt>(),
    ]
}

/// Case-insensitive map from prompt type to builder.
pub struct PromptBuilderRegistry {
    builders: HashMap<String, Arc<dyn PromptBuilder>>,
}

impl PromptBuilderRegistry {
    /// Create a registry seeded with the default builders.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.seed();
        registry
    }

    /// Create a registry with no builders.
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    fn seed(&mut self) {
        for (prompt_type, builder) in default_builders() {
            self.register_instance(prompt_type, builder);
        }
        info!("Registered {} default prompt builders", self.builders.len());
    }

    /// Register a closure as the builder for `prompt_type`.
    pub fn register<F>(&mut self, prompt_type: &str, f: F)
    where
        F: Fn(&Value) -> Result<BuilderOutput, PromptError> + Send + Sync + 'static,
    {
        self.register_instance(prompt_type, Arc::new(FnBuilder::new(f)));
    }

    /// Register a builder object for `prompt_type`, replacing any existing one.
    pub fn register_instance(&mut self, prompt_type: &str, builder: Arc<dyn PromptBuilder>) {
        let key = normalize_key(prompt_type);
        debug!("Registering prompt builder: {}", key);
        self.builders.insert(key, builder);
    }

    /// Look up the builder for `prompt_type`.
    pub fn get(&self, prompt_type: &str) -> Result<Arc<dyn PromptBuilder>, PromptError> {
        self.builders
            .get(&normalize_key(prompt_type))
            .cloned()
            .ok_or_else(|| PromptError::builder_not_found(prompt_type))
    }

    /// Whether a builder is registered for `prompt_type`.
    pub fn contains(&self, prompt_type: &str) -> bool {
        self.builders.contains_key(&normalize_key(prompt_type))
    }

    /// Resolve, invoke and normalize.
    pub fn build(&self, prompt_type: &str, params: &Value) -> Result<PromptResult, PromptError> {
        let key = normalize_key(prompt_type);
        let builder = self.get(&key)?;

        let output = builder.build(params).map_err(|e| {
            let e = e.into_construction(&key);
            if !e.is_validation() {
                error!(prompt_type = %key, error = %e, "Prompt builder failed");
            }
            e
        })?;

        normalize(&key, output).inspect_err(|e| {
            error!(prompt_type = %key, error = %e, "Builder returned an unusable shape");
        })
    }

    /// Drop every registration and re-seed the defaults.
    pub fn reset(&mut self) {
        self.builders.clear();
        self.seed();
    }

    /// Registered keys, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let mut types: Vec<_> = self.builders.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for PromptBuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::domains::prompts::responses::PromptInput;
    use crate::domains::prompts::test_support::valid_params;
    use crate::domains::prompts::types::PromptType;
    use crate::domains::prompts::validation::FieldKind;
    use serde_json::json;

    #[test]
    fn test_default_registration() {
        let registry = PromptBuilderRegistry::new();
        assert_eq!(registry.len(), PromptType::ALL.len());
        assert_eq!(
            registry.registered_types(),
            vec![
                "challenge",
                "difficulty-calibration",
                "evaluation",
                "focus-area",
                "personality",
                "progress"
            ]
        );
    }

    #[test]
    fn test_every_default_type_builds() {
        let registry = PromptBuilderRegistry::new();
        for prompt_type in PromptType::ALL {
            let result = registry
                .build(prompt_type.as_str(), &valid_params(prompt_type))
                .unwrap();
            assert!(!result.input.is_empty(), "{prompt_type}");
            assert!(result.instructions.is_some(), "{prompt_type}");
        }
    }

    fn required_names(registry: &PromptBuilderRegistry, prompt_type: PromptType) -> Vec<&'static str> {
        let builder = registry.get(prompt_type.as_str()).unwrap();
        builder.required_fields().iter().map(|f| f.name).collect()
    }

    #[test]
    fn test_required_fields_match_documented_table() {
        let registry = PromptBuilderRegistry::new();
        let expected: [(PromptType, &[&str]); 6] = [
            (PromptType::Challenge, &["user", "challengeParameters"]),
            (PromptType::Evaluation, &["challenge", "userResponse"]),
            (PromptType::Personality, &["personalityTraits", "aiAttitudes"]),
            (PromptType::Progress, &["user", "challengeHistory"]),
            (PromptType::FocusArea, &["user"]),
            (PromptType::DifficultyCalibration, &["challenges", "difficultyLevels"]),
        ];
        for (prompt_type, fields) in expected {
            assert_eq!(required_names(&registry, prompt_type), fields, "{prompt_type}");

            let builder = registry.get(prompt_type.as_str()).unwrap();
            let advertised: Vec<String> = builder
                .arguments()
                .into_iter()
                .filter(|a| a.required == Some(true))
                .map(|a| a.name)
                .collect();
            assert_eq!(advertised, fields, "{prompt_type}");
        }
    }

    fn assert_rejected(
        registry: &PromptBuilderRegistry,
        prompt_type: PromptType,
        field: &str,
        params: &Value,
    ) {
        let err = registry.build(prompt_type.as_str(), params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed, "{prompt_type}.{field}");
        assert_eq!(err.status_code(), 400);
        match err {
            PromptError::Validation { field: reported, .. } => {
                assert_eq!(reported, field, "{prompt_type}")
            }
            other => panic!("{prompt_type}.{field}: unexpected {other:?}"),
        }
    }

    #[test]
    fn test_every_required_field_is_enforced() {
        let registry = PromptBuilderRegistry::new();
        for prompt_type in PromptType::ALL {
            let builder = registry.get(prompt_type.as_str()).unwrap();
            assert!(registry.build(prompt_type.as_str(), &valid_params(prompt_type)).is_ok());

            for field in builder.required_fields() {
                let wrong_kind = match field.kind {
                    FieldKind::Array => json!("not a list"),
                    FieldKind::Object => json!(["not", "an", "object"]),
                    FieldKind::String => json!(7),
                };

                let mut missing = valid_params(prompt_type);
                missing.as_object_mut().unwrap().remove(field.name);
                assert_rejected(&registry, prompt_type, field.name, &missing);

                for bad in [Value::Null, wrong_kind] {
                    let mut params = valid_params(prompt_type);
                    params[field.name] = bad;
                    assert_rejected(&registry, prompt_type, field.name, &params);
                }

                if field.kind == FieldKind::String {
                    let mut blank = valid_params(prompt_type);
                    blank[field.name] = json!("   ");
                    assert_rejected(&registry, prompt_type, field.name, &blank);
                }
            }
        }
    }

    #[test]
    fn test_unknown_type_is_builder_not_found() {
        let registry = PromptBuilderRegistry::new();
        let err = registry.build("nonexistent-type", &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BuilderNotFound);
        assert!(registry.get("nonexistent-type").is_err());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = PromptBuilderRegistry::new();
        assert!(registry.contains("Difficulty-Calibration"));
        let params = valid_params(PromptType::DifficultyCalibration);
        assert!(registry.build("  DIFFICULTY-CALIBRATION ", &params).is_ok());
    }

    #[test]
    fn test_legacy_registrations_are_normalized() {
        let mut registry = PromptBuilderRegistry::empty();
        registry.register("Legacy-Object", |_| {
            Ok(json!({"prompt": "user text", "systemMessage": "system text"}).into())
        });
        registry.register("legacy-string", |_| Ok(BuilderOutput::Text("user text".into())));
        registry.register("broken", |_| Ok(json!({"prompt": 1}).into()));
        registry.register("failing", |_| Err(PromptError::unknown_type("boom")));

        let result = registry.build("legacy-object", &json!({})).unwrap();
        assert_eq!(result.input, PromptInput::Text("user text".into()));
        assert_eq!(result.instructions.as_deref(), Some("system text"));

        let result = registry.build("LEGACY-STRING", &json!({})).unwrap();
        assert_eq!(result.instructions, None);

        let err = registry.build("broken", &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PromptConstructionError);

        let err = registry.build("failing", &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PromptConstructionError);
    }

    #[test]
    fn test_reset_reseeds_defaults() {
        let mut registry = PromptBuilderRegistry::new();
        registry.register("challenge", |_| Ok(BuilderOutput::Text("overridden".into())));
        registry.register("extra", |_| Ok(BuilderOutput::Text("extra".into())));
        assert_eq!(registry.len(), 7);

        registry.reset();
        assert_eq!(registry.len(), 6);
        assert!(!registry.contains("extra"));

        let result = registry
            .build("challenge", &valid_params(PromptType::Challenge))
            .unwrap();
        assert!(result.input.joined().contains("scenario"));
    }

    #[test]
    fn test_difficulty_calibration_scenario() {
        let registry = PromptBuilderRegistry::new();
        let result = registry
            .build(
                "difficulty-calibration",
                &valid_params(PromptType::DifficultyCalibration),
            )
            .unwrap();
        assert!(result.instructions.unwrap().contains("CURRENT CHALLENGES:"));
        assert!(result.input.joined().contains("2 challenges"));
    }
}

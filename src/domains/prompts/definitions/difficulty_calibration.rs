//! Difficulty calibration prompt definition.

use rmcp::model::PromptArgument;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{PromptDefinition, RenderedPrompt, argument};
use crate::domains::prompts::error::PromptError;
use crate::domains::prompts::lenient::opt_f64;
use crate::domains::prompts::models::{ChallengeRecord, UserProfile};
use crate::domains::prompts::sections::{
    average_score, bullet_list, challenge_line, footer, response_format, section, user_profile,
};
use crate::domains::prompts::types::PromptType;
use crate::domains::prompts::validation::RequiredField;

const DEFAULT_TARGET_SUCCESS_RATE: f64 = 0.7;

/// Params for the difficulty calibration prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCalibrationParams {
    pub challenges: Vec<ChallengeRecord>,
    /// Level names, or objects describing each level.
    pub difficulty_levels: Vec<Value>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Fraction of challenges the user should pass (0-1).
    #[serde(default, deserialize_with = "opt_f64")]
    pub target_success_rate: Option<f64>,
}

pub struct DifficultyCalibrationPrompt;

impl PromptDefinition for DifficultyCalibrationPrompt {
    const PROMPT_TYPE: PromptType = PromptType::DifficultyCalibration;

    type Params = DifficultyCalibrationParams;

    fn required_fields() -> &'static [RequiredField] {
        const FIELDS: &[RequiredField] = &[
            RequiredField::array("challenges"),
            RequiredField::array("difficultyLevels"),
        ];
        FIELDS
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("challenges", "JSON array of challenges to calibrate", true),
            argument("difficultyLevels", "JSON array of available difficulty levels", true),
            argument("user", "User profile as a JSON object", false),
            argument("targetSuccessRate", "Desired pass rate between 0 and 1 (default 0.7)", false),
        ]
    }

    fn render(params: &DifficultyCalibrationParams) -> Result<RenderedPrompt, PromptError> {
        let challenges = &params.challenges;
        let target = params
            .target_success_rate
            .filter(|r| (0.0..=1.0).contains(r))
            .unwrap_or(DEFAULT_TARGET_SUCCESS_RATE);

        let mut system = String::from(
            "You are a game balance specialist. Calibrate the difficulty of each challenge \
             so the user is stretched but not discouraged.",
        );
        if let Some(user) = &params.user {
            system.push_str(&user_profile(user));
        }

        let lines: Vec<String> = challenges.iter().map(challenge_line).collect();
        system.push_str(&section(
            "CURRENT CHALLENGES",
            &bullet_list(&lines, "No challenges provided"),
        ));

        let levels: Vec<String> = params.difficulty_levels.iter().map(level_label).collect();
        system.push_str(&section(
            "AVAILABLE DIFFICULTY LEVELS",
            &bullet_list(&levels, "No levels provided"),
        ));

        let mut guidance = vec![format!(
            "Target success rate: {:.0}%",
            target * 100.0
        )];
        if let Some(average) = average_score(challenges) {
            guidance.push(format!("Observed average score: {:.1}", average));
        }
        guidance.push("Only recommend levels from the available list".to_string());
        guidance.push("Explain each change in one sentence".to_string());
        system.push_str(&section("CALIBRATION GUIDANCE", &bullet_list(&guidance, "")));

        system.push_str(&response_format(
            Self::PROMPT_TYPE.as_str(),
            &json!({
                "calibrations": [{
                    "challenge_id": "id or title of the challenge",
                    "current_difficulty": "current level",
                    "recommended_difficulty": "recommended level",
                    "rationale": "Why"
                }],
                "overall_assessment": "One paragraph"
            }),
        )?);
        system.push_str(&footer());

        let user = format!(
            "Calibrate the difficulty of these {} challenges across {} difficulty levels.",
            challenges.len(),
            levels.len()
        );

        Ok(RenderedPrompt { system, user })
    }
}

/// Level names render as-is; objects use their `name`/`level` field or compact JSON.
fn level_label(level: &Value) -> String {
    match level {
        Value::String(name) => name.clone(),
        Value::Object(object) => {
            let name = object
                .get("name")
                .or_else(|| object.get("level"))
                .and_then(Value::as_str);
            let description = object.get("description").and_then(Value::as_str);
            match (name, description) {
                (Some(name), Some(description)) => format!("{}: {}", name, description),
                (Some(name), None) => name.to_string(),
                _ => level.to_string(),
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> DifficultyCalibrationParams {
        serde_json::from_value(json!({
            "challenges": [
                {"id": "c1", "title": "Ethics dilemma", "difficulty": "easy", "score": 95},
                {"id": "c2", "title": "Creative pitch", "difficulty": "medium", "score": 40},
                {"id": "c3", "title": "Team conflict", "difficulty": "hard"}
            ],
            "difficultyLevels": [
                "easy",
                {"name": "medium", "description": "Some ambiguity"},
                {"level": "hard"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_instructions_list_current_challenges() {
        let rendered = DifficultyCalibrationPrompt::render(&params()).unwrap();
        assert!(rendered.system.contains("CURRENT CHALLENGES:"));
        assert!(rendered.system.contains("- Ethics dilemma (difficulty: easy, score: 95)"));
        assert!(rendered.system.contains("- medium: Some ambiguity"));
        assert!(rendered.system.contains("- hard\n"));
        assert!(rendered.system.contains("Target success rate: 70%"));
        assert!(rendered.system.contains("Observed average score: 67.5"));
    }

    #[test]
    fn test_input_mentions_challenge_count() {
        let rendered = DifficultyCalibrationPrompt::render(&params()).unwrap();
        assert!(rendered.user.contains("3 challenges"));
    }

    #[test]
    fn test_out_of_range_target_uses_default() {
        let mut params = params();
        params.target_success_rate = Some(1.5);
        let rendered = DifficultyCalibrationPrompt::render(&params).unwrap();
        assert!(rendered.system.contains("Target success rate: 70%"));

        params.target_success_rate = Some(0.5);
        let rendered = DifficultyCalibrationPrompt::render(&params).unwrap();
        assert!(rendered.system.contains("Target success rate: 50%"));
    }

    #[test]
    fn test_numeric_ids_and_string_target_build() {
        use crate::domains::prompts::builder::{DefinitionBuilder, PromptBuilder};

        let builder = DefinitionBuilder::<DifficultyCalibrationPrompt>::new();
        let output = builder.build(&json!({
            "challenges": [{"id": 1}, {"id": 2, "timeSpent": 45.5}],
            "difficultyLevels": ["easy"],
            "targetSuccessRate": "0.6"
        }));
        assert!(output.is_ok(), "{:?}", output.err());

        let params: DifficultyCalibrationParams = serde_json::from_value(json!({
            "challenges": [{"id": 1}],
            "difficultyLevels": ["easy"],
            "targetSuccessRate": "0.6"
        }))
        .unwrap();
        assert_eq!(params.challenges[0].id.as_deref(), Some("1"));
        let rendered = DifficultyCalibrationPrompt::render(&params).unwrap();
        assert!(rendered.system.contains("Target success rate: 60%"));
        assert!(rendered.user.contains("1 challenge"));
    }

    #[test]
    fn test_level_label_fallback() {
        assert_eq!(level_label(&json!(3)), "3");
        assert_eq!(level_label(&json!({"rank": 1})), "{\"rank\":1}");
    }
}

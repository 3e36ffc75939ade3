//! Params fixtures shared by prompt tests.

use serde_json::{Value, json};

use super::types::PromptType;

/// Minimal valid params for every default prompt type.
pub(crate) fn valid_params(prompt_type: PromptType) -> Value {
    match prompt_type {
        PromptType::Challenge => json!({
            "user": {"fullName": "Ada"},
            "challengeParameters": {"challengeType": "scenario"}
        }),
        PromptType::Evaluation => json!({
            "challenge": {"title": "Pitch"},
            "userResponse": "My answer"
        }),
        PromptType::Personality => json!({
            "personalityTraits": {"openness": 70},
            "aiAttitudes": {"trust": 40}
        }),
        PromptType::Progress => json!({
            "user": {},
            "challengeHistory": [{"title": "A", "score": 80}]
        }),
        PromptType::FocusArea => json!({"user": {"focusAreas": ["Design"]}}),
        PromptType::DifficultyCalibration => json!({
            "challenges": [{"id": "c1"}, {"id": "c2"}],
            "difficultyLevels": ["easy", "hard"]
        }),
    }
}

//! Focus area recommendation prompt definition.

use rmcp::model::PromptArgument;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

use super::{PromptDefinition, RenderedPrompt, argument};
use crate::domains::prompts::error::PromptError;
use crate::domains::prompts::lenient::opt_i64;
use crate::domains::prompts::models::{ChallengeRecord, UserProfile};
use crate::domains::prompts::sections::{
    bullet_list, challenge_history, footer, goals, response_format, section, to_pretty_json,
    user_profile,
};
use crate::domains::prompts::types::PromptType;
use crate::domains::prompts::validation::RequiredField;

const DEFAULT_COUNT: i64 = 3;
const MAX_COUNT: i64 = 10;

fn default_count() -> i64 {
    DEFAULT_COUNT
}

/// Any integer-like value; the range is enforced when rendering.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(opt_i64(deserializer)?.unwrap_or(DEFAULT_COUNT))
}

/// Params for the focus area prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FocusAreaParams {
    pub user: UserProfile,
    #[serde(default)]
    pub challenge_history: Vec<ChallengeRecord>,
    /// Free-form progress metrics from the client.
    #[serde(default)]
    pub progress_data: Map<String, Value>,
    /// How many focus areas to recommend, clamped to 1-10.
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub count: i64,
}

pub struct FocusAreaPrompt;

impl PromptDefinition for FocusAreaPrompt {
    const PROMPT_TYPE: PromptType = PromptType::FocusArea;

    type Params = FocusAreaParams;

    fn required_fields() -> &'static [RequiredField] {
        const FIELDS: &[RequiredField] = &[RequiredField::object("user")];
        FIELDS
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("user", "User profile as a JSON object", true),
            argument("challengeHistory", "JSON array of completed challenges", false),
            argument("progressData", "JSON object of progress metrics", false),
            argument("count", "Number of focus areas to recommend (default 3)", false),
        ]
    }

    fn render(params: &FocusAreaParams) -> Result<RenderedPrompt, PromptError> {
        let count = params.count.clamp(1, MAX_COUNT);

        let mut system = String::from(
            "You are a career development advisor. Recommend focus areas where this user \
             can build skills that stay valuable as AI grows more capable.",
        );
        system.push_str(&user_profile(&params.user));
        system.push_str(&goals(&params.user));
        if !params.challenge_history.is_empty() {
            system.push_str(&challenge_history("CHALLENGE HISTORY", &params.challenge_history));
        }
        if !params.progress_data.is_empty() {
            system.push_str(&section(
                "PROGRESS DATA",
                &to_pretty_json(Self::PROMPT_TYPE.as_str(), &params.progress_data)?,
            ));
        }
        system.push_str(&section(
            "GUIDANCE",
            &bullet_list(
                &[
                    format!("Recommend exactly {} focus areas", count),
                    "Order them by priority, 1 being the most important".to_string(),
                    "Prefer areas adjacent to the user's existing focus areas".to_string(),
                    "Explain each rationale with evidence from the profile or history".to_string(),
                ],
                "",
            ),
        ));
        system.push_str(&response_format(
            Self::PROMPT_TYPE.as_str(),
            &json!({
                "focus_areas": [{
                    "name": "Focus area name",
                    "description": "What the area covers",
                    "priority": 1,
                    "rationale": "Why it matters for this user"
                }]
            }),
        )?);
        system.push_str(&footer());

        let user = format!("Recommend {} focus areas for my next challenges.", count);

        Ok(RenderedPrompt { system, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_count() {
        let params: FocusAreaParams = serde_json::from_value(json!({"user": {}})).unwrap();
        assert_eq!(params.count, 3);
        let rendered = FocusAreaPrompt::render(&params).unwrap();
        assert!(rendered.user.contains("Recommend 3 focus areas"));
        assert!(!rendered.system.contains("PROGRESS DATA"));
    }

    #[test]
    fn test_count_is_clamped_and_progress_rendered() {
        let params: FocusAreaParams = serde_json::from_value(json!({
            "user": {},
            "count": 50,
            "progressData": {"completion": 0.8}
        }))
        .unwrap();
        let rendered = FocusAreaPrompt::render(&params).unwrap();
        assert!(rendered.system.contains("exactly 10 focus areas"));
        assert!(rendered.system.contains("\"completion\": 0.8"));
    }

    #[test]
    fn test_any_out_of_range_count_is_clamped() {
        for (count, expected) in [
            (json!(300), 10),
            (json!(-1), 1),
            (json!(0), 1),
            (json!("7"), 7),
            (json!(null), 3),
        ] {
            let params: FocusAreaParams =
                serde_json::from_value(json!({"user": {}, "count": count})).unwrap();
            let rendered = FocusAreaPrompt::render(&params).unwrap();
            assert!(
                rendered.user.contains(&format!("Recommend {} focus areas", expected)),
                "count {} rendered as {}",
                count,
                rendered.user
            );
        }
    }
}

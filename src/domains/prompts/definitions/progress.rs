//! Progress analysis prompt definition.

use rmcp::model::PromptArgument;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{PromptDefinition, RenderedPrompt, argument};
use crate::domains::prompts::error::PromptError;
use crate::domains::prompts::models::{ChallengeRecord, UserProfile};
use crate::domains::prompts::sections::{
    average_score, bullet_list, challenge_history, footer, goals, response_format, section,
    user_profile,
};
use crate::domains::prompts::types::PromptType;
use crate::domains::prompts::validation::RequiredField;

/// Params for the progress prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressParams {
    pub user: UserProfile,
    pub challenge_history: Vec<ChallengeRecord>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    /// e.g. "last 30 days".
    #[serde(default)]
    pub timeframe: Option<String>,
}

pub struct ProgressPrompt;

impl PromptDefinition for ProgressPrompt {
    const PROMPT_TYPE: PromptType = PromptType::Progress;

    type Params = ProgressParams;

    fn required_fields() -> &'static [RequiredField] {
        const FIELDS: &[RequiredField] = &[
            RequiredField::object("user"),
            RequiredField::array("challengeHistory"),
        ];
        FIELDS
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("user", "User profile as a JSON object", true),
            argument("challengeHistory", "JSON array of completed challenges", true),
            argument("focusAreas", "JSON array of focus areas to emphasize", false),
            argument("timeframe", "Period covered by the history, e.g. 'last 30 days'", false),
        ]
    }

    fn render(params: &ProgressParams) -> Result<RenderedPrompt, PromptError> {
        let history = &params.challenge_history;
        let timeframe = params.timeframe.as_deref().unwrap_or("all time");

        let mut system = String::from(
            "You are a learning coach reviewing a user's performance in human-vs-AI \
             challenges. Identify real trends in the data; do not invent results that are \
             not in the history.",
        );
        system.push_str(&user_profile(&params.user));
        system.push_str(&goals(&params.user));
        system.push_str(&challenge_history("CHALLENGE HISTORY", history));

        let mut stats = vec![
            format!("Timeframe: {}", timeframe),
            format!("Completed challenges: {}", history.len()),
        ];
        if let Some(average) = average_score(history) {
            stats.push(format!("Average score: {:.1}", average));
        }
        system.push_str(&section("SUMMARY STATISTICS", &bullet_list(&stats, "")));

        let focus: Vec<&str> = if params.focus_areas.is_empty() {
            params.user.focus_areas.iter().map(String::as_str).collect()
        } else {
            params.focus_areas.iter().map(String::as_str).collect()
        };
        if !focus.is_empty() {
            system.push_str(&section("FOCUS AREAS TO EMPHASIZE", &bullet_list(&focus, "")));
        }

        system.push_str(&response_format(
            Self::PROMPT_TYPE.as_str(),
            &json!({
                "summary": "Overall progress in two or three sentences",
                "trends": ["Observed trend"],
                "strengths": ["Strength"],
                "areas_for_growth": ["Area"],
                "next_steps": ["Concrete next step"]
            }),
        )?);
        system.push_str(&footer());

        let user = if history.is_empty() {
            "I have not completed any challenges yet. Suggest how to get started.".to_string()
        } else {
            format!(
                "Analyze my progress across {} completed challenges ({}).",
                history.len(),
                timeframe
            )
        };

        Ok(RenderedPrompt { system, user })
    }
}

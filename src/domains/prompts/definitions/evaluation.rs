//! Response evaluation prompt definition.

use rmcp::model::PromptArgument;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{PromptDefinition, RenderedPrompt, argument};
use crate::domains::prompts::error::PromptError;
use crate::domains::prompts::lenient::opt_string_or_number;
use crate::domains::prompts::models::UserProfile;
use crate::domains::prompts::sections::{
    bullet_list, footer, response_format, section, user_profile,
};
use crate::domains::prompts::types::PromptType;
use crate::domains::prompts::validation::RequiredField;

/// The challenge being answered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluatedChallenge {
    #[serde(deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub challenge_type: Option<String>,
    pub focus_area: Option<String>,
    pub difficulty: Option<String>,
    pub questions: Vec<String>,
}

/// Params for the evaluation prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationParams {
    pub challenge: EvaluatedChallenge,
    pub user_response: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub evaluation_criteria: Vec<String>,
}

/// Scores a user's answer and compares it with what an AI would produce.
pub struct EvaluationPrompt;

const DEFAULT_CRITERIA: [&str; 4] = [
    "Depth of reasoning",
    "Originality and creativity",
    "Awareness of human context and nuance",
    "Clarity of communication",
];

impl PromptDefinition for EvaluationPrompt {
    const PROMPT_TYPE: PromptType = PromptType::Evaluation;

    type Params = EvaluationParams;

    fn required_fields() -> &'static [RequiredField] {
        const FIELDS: &[RequiredField] = &[
            RequiredField::object("challenge"),
            RequiredField::string("userResponse"),
        ];
        FIELDS
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("challenge", "The answered challenge as a JSON object", true),
            argument("userResponse", "The user's answer text", true),
            argument("user", "User profile as a JSON object", false),
            argument("evaluationCriteria", "JSON array of criteria to score against", false),
        ]
    }

    fn render(params: &EvaluationParams) -> Result<RenderedPrompt, PromptError> {
        let challenge = &params.challenge;

        let mut system = String::from(
            "You are a fair and encouraging evaluator. Score the user's response to the \
             challenge below and explain how it compares with a typical AI-generated answer, \
             highlighting what the human did better.",
        );
        if let Some(user) = &params.user {
            system.push_str(&user_profile(user));
        }

        let mut details = Vec::new();
        if let Some(title) = &challenge.title {
            details.push(format!("Title: {}", title));
        }
        if let Some(kind) = &challenge.challenge_type {
            details.push(format!("Type: {}", kind));
        }
        if let Some(focus) = &challenge.focus_area {
            details.push(format!("Focus area: {}", focus));
        }
        if let Some(difficulty) = &challenge.difficulty {
            details.push(format!("Difficulty: {}", difficulty));
        }
        system.push_str(&section(
            "CHALLENGE",
            &bullet_list(&details, "No challenge metadata provided"),
        ));
        if let Some(content) = &challenge.content {
            system.push_str(&section("CHALLENGE CONTENT", content));
        }
        if !challenge.questions.is_empty() {
            system.push_str(&section(
                "QUESTIONS",
                &bullet_list(&challenge.questions, ""),
            ));
        }

        let criteria: Vec<String> = if params.evaluation_criteria.is_empty() {
            DEFAULT_CRITERIA.iter().map(|c| c.to_string()).collect()
        } else {
            params.evaluation_criteria.clone()
        };
        system.push_str(&section("EVALUATION CRITERIA", &bullet_list(&criteria, "")));
        system.push_str(&section(
            "SCORING GUIDANCE",
            "- Score from 0 to 100; 70 means a solid, thoughtful answer\n\
             - Reward specific reasoning over length\n\
             - Name at least one concrete strength and one concrete improvement",
        ));

        system.push_str(&response_format(
            Self::PROMPT_TYPE.as_str(),
            &json!({
                "score": 75,
                "strengths": ["Specific strength"],
                "improvements": ["Specific improvement"],
                "feedback": "Two or three sentences of overall feedback",
                "ai_comparison": "How this answer differs from a typical AI answer"
            }),
        )?);
        system.push_str(&footer());

        let user = format!(
            "Evaluate this response to \"{}\":\n\n{}",
            challenge.title.as_deref().unwrap_or("the challenge"),
            params.user_response.trim()
        );

        Ok(RenderedPrompt { system, user })
    }
}

//! Personality insights prompt definition.

use rmcp::model::PromptArgument;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use super::{PromptDefinition, RenderedPrompt, argument};
use crate::domains::prompts::error::PromptError;
use crate::domains::prompts::models::UserProfile;
use crate::domains::prompts::sections::{
    footer, response_format, score_list, section, user_profile,
};
use crate::domains::prompts::types::PromptType;
use crate::domains::prompts::validation::RequiredField;

/// Params for the personality prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityParams {
    pub personality_traits: BTreeMap<String, f64>,
    pub ai_attitudes: BTreeMap<String, f64>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Turns trait and attitude scores into actionable insights.
pub struct PersonalityPrompt;

impl PromptDefinition for PersonalityPrompt {
    const PROMPT_TYPE: PromptType = PromptType::Personality;

    type Params = PersonalityParams;

    fn required_fields() -> &'static [RequiredField] {
        const FIELDS: &[RequiredField] = &[
            RequiredField::object("personalityTraits"),
            RequiredField::object("aiAttitudes"),
        ];
        FIELDS
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument(
                "personalityTraits",
                "JSON object mapping trait names to scores (0-100)",
                true,
            ),
            argument(
                "aiAttitudes",
                "JSON object mapping AI attitude names to scores (0-100)",
                true,
            ),
            argument("user", "User profile as a JSON object", false),
        ]
    }

    fn render(params: &PersonalityParams) -> Result<RenderedPrompt, PromptError> {
        let mut system = String::from(
            "You are an organizational psychologist. Interpret the user's personality \
             traits and attitudes toward AI, and describe how they can best work alongside \
             AI tools while developing the strengths AI cannot replace.",
        );
        if let Some(user) = &params.user {
            system.push_str(&user_profile(user));
        }
        system.push_str(&section(
            "PERSONALITY TRAITS",
            &score_list(&params.personality_traits, "No traits provided"),
        ));
        system.push_str(&section(
            "AI ATTITUDES",
            &score_list(&params.ai_attitudes, "No attitudes provided"),
        ));
        system.push_str(&section(
            "GUIDANCE",
            "- Treat scores above 70 as pronounced and below 30 as low\n\
             - Be specific and supportive; avoid clinical labels\n\
             - Recommendations must be actions the user can take this week",
        ));
        system.push_str(&response_format(
            Self::PROMPT_TYPE.as_str(),
            &json!({
                "summary": "Two or three sentences",
                "strengths": ["Strength"],
                "growth_areas": ["Growth area"],
                "ai_collaboration_style": "How the user tends to work with AI",
                "recommendations": ["Recommendation"]
            }),
        )?);
        system.push_str(&footer());

        let user = format!(
            "Analyze my profile: {} personality traits and {} AI attitudes are listed in the \
             instructions.",
            params.personality_traits.len(),
            params.ai_attitudes.len()
        );

        Ok(RenderedPrompt { system, user })
    }
}

//! Challenge generation prompt definition.

use rmcp::model::PromptArgument;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{PromptDefinition, RenderedPrompt, argument};
use crate::domains::prompts::error::PromptError;
use crate::domains::prompts::models::{ChallengeRecord, GameState, UserProfile};
use crate::domains::prompts::sections::{
    bullet_list, challenge_history, footer, goals, response_format, section, user_profile,
};
use crate::domains::prompts::types::PromptType;
use crate::domains::prompts::validation::RequiredField;

/// What kind of challenge to generate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ChallengeParameters {
    pub challenge_type: Option<String>,
    pub focus_area: Option<String>,
    pub difficulty: Option<String>,
    pub format_type: Option<String>,
    pub time_limit_minutes: Option<u32>,
    pub creative_constraints: Vec<String>,
}

/// Params for the challenge prompt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeParams {
    pub user: UserProfile,
    pub challenge_parameters: ChallengeParameters,
    #[serde(default)]
    pub recent_challenges: Vec<ChallengeRecord>,
    #[serde(default)]
    pub game_state: Option<GameState>,
}

/// Generates a new challenge tailored to the user.
pub struct ChallengePrompt;

impl PromptDefinition for ChallengePrompt {
    const PROMPT_TYPE: PromptType = PromptType::Challenge;

    type Params = ChallengeParams;

    fn required_fields() -> &'static [RequiredField] {
        const FIELDS: &[RequiredField] = &[
            RequiredField::object("user"),
            RequiredField::object("challengeParameters"),
        ];
        FIELDS
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("user", "User profile as a JSON object", true),
            argument(
                "challengeParameters",
                "JSON object with challengeType, focusArea, difficulty and formatType",
                true,
            ),
            argument(
                "recentChallenges",
                "JSON array of recently completed challenges to avoid repeating",
                false,
            ),
            argument("gameState", "JSON object with level, streak and currentDifficulty", false),
        ]
    }

    fn render(params: &ChallengeParams) -> Result<RenderedPrompt, PromptError> {
        let setup = &params.challenge_parameters;
        let challenge_type = setup.challenge_type.as_deref().unwrap_or("critical-thinking");
        let focus_area = setup
            .focus_area
            .as_deref()
            .or_else(|| params.user.focus_areas.first().map(String::as_str))
            .unwrap_or("general reasoning");
        let difficulty = setup
            .difficulty
            .as_deref()
            .or_else(|| {
                params
                    .game_state
                    .as_ref()
                    .and_then(|g| g.current_difficulty.as_deref())
            })
            .unwrap_or("intermediate");
        let format_type = setup.format_type.as_deref().unwrap_or("open-ended");

        let mut system = String::from(
            "You are an expert assessment designer for a game where humans compete \
             with AI on tasks that reward uniquely human strengths: judgment, creativity, \
             empathy and contextual reasoning. Design challenges that an AI would find \
             hard to answer as well as a thoughtful human.",
        );
        system.push_str(&user_profile(&params.user));
        system.push_str(&goals(&params.user));
        system.push_str(&challenge_history(
            "RECENT CHALLENGES (do not repeat these)",
            &params.recent_challenges,
        ));

        if let Some(state) = &params.game_state {
            let mut lines = Vec::new();
            if let Some(level) = state.level {
                lines.push(format!("Level: {}", level));
            }
            if let Some(streak) = state.streak {
                lines.push(format!("Current streak: {}", streak));
            }
            if state.recently_failed {
                lines.push("The user failed their last challenge; keep this one encouraging".into());
            }
            if !lines.is_empty() {
                system.push_str(&section("GAME STATE", &bullet_list(&lines, "")));
            }
        }

        let mut guidance = vec![
            format!("Challenge type: {}", challenge_type),
            format!("Focus area: {}", focus_area),
            format!("Difficulty: {}", difficulty),
            format!("Format: {}", format_type),
            "Ground the scenario in the user's professional context when one is given".to_string(),
            "Include 2-4 questions that require explaining reasoning, not recalling facts".to_string(),
        ];
        if let Some(minutes) = setup.time_limit_minutes {
            guidance.push(format!("It must be answerable within {} minutes", minutes));
        }
        for constraint in &setup.creative_constraints {
            guidance.push(format!("Constraint: {}", constraint));
        }
        system.push_str(&section("CHALLENGE GUIDELINES", &bullet_list(&guidance, "")));

        system.push_str(&response_format(
            Self::PROMPT_TYPE.as_str(),
            &json!({
                "title": "A short, engaging title",
                "description": "One sentence describing the task",
                "content": "The full scenario the user works through",
                "questions": ["Question 1", "Question 2"],
                "evaluation_criteria": ["Criterion 1", "Criterion 2"],
                "difficulty": difficulty,
                "estimated_minutes": setup.time_limit_minutes.unwrap_or(10)
            }),
        )?);
        system.push_str(&footer());

        let user = format!(
            "Create a new {} {} challenge focused on {} in {} format. Make it distinct from \
             the user's recent challenges.",
            difficulty, challenge_type, focus_area, format_type
        );

        Ok(RenderedPrompt { system, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> ChallengeParams {
        serde_json::from_value(json!({
            "user": {"fullName": "Ada", "focusAreas": ["AI ethics"]},
            "challengeParameters": {"challengeType": "scenario", "difficulty": "hard"},
            "recentChallenges": [{"title": "Trolley redux", "score": 55}],
            "gameState": {"level": 3, "streak": 2}
        }))
        .unwrap()
    }

    #[test]
    fn test_challenge_prompt_metadata() {
        assert_eq!(ChallengePrompt::PROMPT_TYPE.as_str(), "challenge");
        let args = ChallengePrompt::arguments();
        assert_eq!(args.len(), 4);
        assert_eq!(args[0].required, Some(true));
        assert_eq!(args[1].required, Some(true));
        assert_eq!(args[2].required, Some(false));
        assert_eq!(ChallengePrompt::required_fields().len(), 2);
    }

    #[test]
    fn test_render_uses_parameters_and_profile() {
        let rendered = ChallengePrompt::render(&params()).unwrap();
        assert!(rendered.system.contains("USER PROFILE:"));
        assert!(rendered.system.contains("Trolley redux"));
        assert!(rendered.system.contains("Current streak: 2"));
        assert!(rendered.system.contains("RESPONSE RULES:"));
        assert!(rendered.user.contains("hard scenario challenge focused on AI ethics"));
    }

    #[test]
    fn test_render_defaults() {
        let params: ChallengeParams =
            serde_json::from_value(json!({"user": {}, "challengeParameters": {}})).unwrap();
        let rendered = ChallengePrompt::render(&params).unwrap();
        assert!(rendered.user.contains("intermediate critical-thinking"));
        assert!(rendered.system.contains("No previous challenges"));
    }
}

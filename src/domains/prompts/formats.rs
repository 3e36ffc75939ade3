//! Expected LLM response shapes, one per prompt type.
//!
//! These structs are never deserialized by this crate; they exist to produce
//! the JSON Schema handed to the provider as the structured output format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ChallengeResponse {
    pub title: String,
    pub description: String,
    /// The scenario text the user works through.
    pub content: String,
    pub questions: Vec<String>,
    pub evaluation_criteria: Vec<String>,
    pub difficulty: String,
    pub estimated_minutes: u32,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationResponse {
    /// 0-100.
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: String,
    pub ai_comparison: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PersonalityInsightsResponse {
    pub summary: String,
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    pub ai_collaboration_style: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProgressAnalysisResponse {
    pub summary: String,
    pub trends: Vec<String>,
    pub strengths: Vec<String>,
    pub areas_for_growth: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FocusAreaRecommendation {
    pub name: String,
    pub description: String,
    /// 1 is highest.
    pub priority: u8,
    pub rationale: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FocusAreaResponse {
    pub focus_areas: Vec<FocusAreaRecommendation>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DifficultyCalibration {
    pub challenge_id: String,
    pub current_difficulty: String,
    pub recommended_difficulty: String,
    pub rationale: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DifficultyCalibrationResponse {
    pub calibrations: Vec<DifficultyCalibration>,
    pub overall_assessment: String,
}

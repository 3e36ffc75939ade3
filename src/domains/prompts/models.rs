//! Param models shared across prompt types.
//!
//! Callers send camelCase JSON from the web client; every field beyond the
//! ones a prompt type requires is optional, so these structs default
//! liberally.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lenient::{opt_f64, opt_string_or_number, opt_u64};

/// The assessed user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub professional_title: Option<String>,
    pub location: Option<String>,
    /// Trait name to score (0-100).
    pub personality_traits: BTreeMap<String, f64>,
    /// Attitude name to score (0-100).
    pub ai_attitudes: BTreeMap<String, f64>,
    pub focus_areas: Vec<String>,
    pub learning_goals: Vec<String>,
    pub skill_level: Option<String>,
}

impl UserProfile {
    /// Display name, falling back to the email local part.
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.email.as_deref().and_then(|e| e.split('@').next()))
    }
}

/// A challenge the user attempted or is about to attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ChallengeRecord {
    /// Database rows send numeric ids; both forms are kept as strings.
    #[serde(deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub challenge_type: Option<String>,
    pub focus_area: Option<String>,
    pub difficulty: Option<String>,
    /// Score out of 100.
    #[serde(deserialize_with = "opt_f64")]
    pub score: Option<f64>,
    pub completed_at: Option<String>,
    /// Seconds the user spent on the challenge.
    #[serde(deserialize_with = "opt_u64")]
    pub time_spent: Option<u64>,
}

impl ChallengeRecord {
    /// Title or id, whichever identifies the challenge best.
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("Untitled challenge")
    }
}

/// Progression state from the game layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GameState {
    pub level: Option<u32>,
    pub streak: Option<u32>,
    pub current_difficulty: Option<String>,
    pub recently_failed: bool,
}

//! Reusable prompt sections.
//!
//! Builders assemble their system and user messages from these blocks so the
//! wording of shared parts (profile, history, footer) stays consistent.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use super::error::PromptError;
use super::models::{ChallengeRecord, UserProfile};

/// Closing rules appended to every system message.
pub const API_STANDARD_FOOTER: &str = "RESPONSE RULES:
- Respond with a single valid JSON object and nothing else.
- Do not wrap the JSON in markdown code fences.
- Use exactly the field names shown in the response format.
- Keep every string free of unescaped control characters.";

/// Number of history entries rendered before eliding the rest.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Pretty-printed JSON for embedding in a prompt.
pub fn to_pretty_json<T: Serialize>(prompt_type: &str, value: &T) -> Result<String, PromptError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PromptError::construction(prompt_type, format!("serialization failed: {e}")))
}

/// `HEADING:` followed by `body`, separated from the previous section.
pub fn section(heading: &str, body: &str) -> String {
    format!("\n\n{}:\n{}", heading, body.trim_end())
}

/// Bulleted list, or `empty` when there are no items.
pub fn bullet_list<S: AsRef<str>>(items: &[S], empty: &str) -> String {
    if items.is_empty() {
        return format!("- {}", empty);
    }
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `name: score/100` lines, highest score first.
pub fn score_list(scores: &BTreeMap<String, f64>, empty: &str) -> String {
    if scores.is_empty() {
        return format!("- {}", empty);
    }
    let mut entries: Vec<_> = scores.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .map(|(name, score)| format!("- {}: {}/100", name, format_score(*score)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{:.1}", score)
    }
}

/// The USER PROFILE block.
pub fn user_profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    if let Some(name) = profile.display_name() {
        let _ = writeln!(out, "- Name: {}", name);
    }
    if let Some(title) = &profile.professional_title {
        let _ = writeln!(out, "- Professional title: {}", title);
    }
    if let Some(location) = &profile.location {
        let _ = writeln!(out, "- Location: {}", location);
    }
    if let Some(level) = &profile.skill_level {
        let _ = writeln!(out, "- Skill level: {}", level);
    }
    if !profile.focus_areas.is_empty() {
        let _ = writeln!(out, "- Focus areas: {}", profile.focus_areas.join(", "));
    }
    if !profile.personality_traits.is_empty() {
        let _ = writeln!(out, "- Personality traits:");
        for line in score_list(&profile.personality_traits, "").lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
    if !profile.ai_attitudes.is_empty() {
        let _ = writeln!(out, "- Attitudes toward AI:");
        for line in score_list(&profile.ai_attitudes, "").lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
    if out.is_empty() {
        out.push_str("- No profile information provided");
    }
    section("USER PROFILE", &out)
}

/// The LEARNING GOALS block, empty when the user has none.
pub fn goals(profile: &UserProfile) -> String {
    if profile.learning_goals.is_empty() {
        return String::new();
    }
    section(
        "LEARNING GOALS",
        &bullet_list(&profile.learning_goals, "None"),
    )
}

/// One line per challenge, newest entries last, capped at [`MAX_HISTORY_ENTRIES`].
pub fn challenge_history(heading: &str, history: &[ChallengeRecord]) -> String {
    if history.is_empty() {
        return section(heading, "- No previous challenges");
    }

    let skipped = history.len().saturating_sub(MAX_HISTORY_ENTRIES);
    let mut body = String::new();
    if skipped > 0 {
        let _ = writeln!(body, "- ({} earlier challenges omitted)", skipped);
    }
    for record in &history[skipped..] {
        let _ = writeln!(body, "- {}", challenge_line(record));
    }
    section(heading, &body)
}

/// Compact single-line summary of a challenge.
pub fn challenge_line(record: &ChallengeRecord) -> String {
    let mut line = record.label().to_string();
    let details: Vec<String> = [
        record.challenge_type.as_ref().map(|t| format!("type: {}", t)),
        record.focus_area.as_ref().map(|f| format!("focus: {}", f)),
        record.difficulty.as_ref().map(|d| format!("difficulty: {}", d)),
        record.score.map(|s| format!("score: {}", format_score(s))),
        record.time_spent.map(|t| format!("time: {}s", t)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !details.is_empty() {
        let _ = write!(line, " ({})", details.join(", "));
    }
    line
}

/// Mean score of the scored challenges.
pub fn average_score(history: &[ChallengeRecord]) -> Option<f64> {
    let scores: Vec<f64> = history.iter().filter_map(|r| r.score).collect();
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// RESPONSE FORMAT block with a JSON example.
pub fn response_format<T: Serialize>(prompt_type: &str, example: &T) -> Result<String, PromptError> {
    let json = to_pretty_json(prompt_type, example)?;
    Ok(section(
        "RESPONSE FORMAT",
        &format!("Return JSON matching this example:\n{}", json),
    ))
}

/// The standard footer as a trailing section.
pub fn footer() -> String {
    format!("\n\n{}", API_STANDARD_FOOTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, score: Option<f64>) -> ChallengeRecord {
        ChallengeRecord {
            title: Some(title.to_string()),
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(&["a", "b"], "none"), "- a\n- b");
        assert_eq!(bullet_list::<&str>(&[], "none"), "- none");
    }

    #[test]
    fn test_score_list_orders_by_score() {
        let mut scores = BTreeMap::new();
        scores.insert("curiosity".to_string(), 60.0);
        scores.insert("analytical".to_string(), 85.5);
        assert_eq!(
            score_list(&scores, "none"),
            "- analytical: 85.5/100\n- curiosity: 60/100"
        );
    }

    #[test]
    fn test_user_profile_section() {
        let profile = UserProfile {
            full_name: Some("Ada Lovelace".into()),
            focus_areas: vec!["Creative writing".into()],
            ..Default::default()
        };
        let text = user_profile(&profile);
        assert!(text.starts_with("\n\nUSER PROFILE:\n"));
        assert!(text.contains("- Name: Ada Lovelace"));
        assert!(text.contains("- Focus areas: Creative writing"));

        let empty = user_profile(&UserProfile::default());
        assert!(empty.contains("No profile information provided"));
    }

    #[test]
    fn test_history_is_capped() {
        let history: Vec<_> = (0..12).map(|i| record(&format!("C{}", i), None)).collect();
        let text = challenge_history("HISTORY", &history);
        assert!(text.contains("(2 earlier challenges omitted)"));
        assert!(!text.contains("- C1\n"));
        assert!(text.contains("- C11"));
    }

    #[test]
    fn test_average_score() {
        let history = vec![record("a", Some(80.0)), record("b", None), record("c", Some(60.0))];
        assert_eq!(average_score(&history), Some(70.0));
        assert_eq!(average_score(&[]), None);
    }

    #[test]
    fn test_challenge_line_details() {
        let mut r = record("Bias spotting", Some(72.0));
        r.difficulty = Some("hard".into());
        assert_eq!(challenge_line(&r), "Bias spotting (difficulty: hard, score: 72)");
    }
}

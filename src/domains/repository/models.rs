//! Stored prompt records and the inputs used to create or change them.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;

use super::error::RepositoryError;

/// Default number of history rows returned when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// A stored prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptTemplate {
    pub id: String,
    /// Unique template name.
    pub name: String,
    pub content: String,
    pub category: Option<String>,
    pub domain: Option<String>,
    /// Placeholder names used by `content`.
    pub variables: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NewPromptTemplate {
    /// Unique template name.
    pub name: String,
    /// Template body.
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Placeholder names used by `content`.
    #[serde(default)]
    pub variables: Vec<String>,
}

impl NewPromptTemplate {
    /// Reject blank names and bodies.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("content", &self.content)
    }
}

/// Partial template update. Absent fields are left unchanged.
///
/// `category` and `domain` are nullable: an explicit `null` clears them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TemplatePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub domain: Option<Option<String>>,
    #[serde(default)]
    pub variables: Option<Vec<String>>,
}

/// Present-but-null reads as `Some(None)`; a missing field stays `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TemplatePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.domain.is_none()
            && self.variables.is_none()
    }

    pub fn validate(&self) -> Result<(), RepositoryError> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        if let Some(content) = &self.content {
            require_non_blank("content", content)?;
        }
        Ok(())
    }
}

/// Filter for listing templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TemplateFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Maximum number of templates to return.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One recorded use of a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptHistoryEntry {
    pub id: String,
    pub template_id: Option<String>,
    /// The rendered prompt that was sent.
    pub content: String,
    pub domain: Option<String>,
    pub context: Option<Value>,
    pub variables: Map<String, Value>,
    /// What the model returned, if recorded.
    pub result: Option<Value>,
    pub user_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new history row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NewHistoryEntry {
    #[serde(default)]
    pub template_id: Option<String>,
    /// The rendered prompt that was sent.
    pub content: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
    #[serde(default)]
    pub variables: Map<String, Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl NewHistoryEntry {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        require_non_blank("content", &self.content)
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::invalid_input(field, "must not be blank"));
    }
    Ok(())
}

/// Row shape of `prompt_templates`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TemplateRow {
    pub id: String,
    pub name: String,
    pub content: String,
    pub category: Option<String>,
    pub domain: Option<String>,
    pub variables: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TemplateRow> for PromptTemplate {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            content: row.content,
            category: row.category,
            domain: row.domain,
            variables: row.variables.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row shape of `prompt_history`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct HistoryRow {
    pub id: String,
    pub template_id: Option<String>,
    pub content: String,
    pub domain: Option<String>,
    pub context: Option<Json<Value>>,
    pub variables: Json<Map<String, Value>>,
    pub result: Option<Json<Value>>,
    pub user_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<HistoryRow> for PromptHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            id: row.id,
            template_id: row.template_id,
            content: row.content,
            domain: row.domain,
            context: row.context.map(|c| c.0),
            variables: row.variables.0,
            result: row.result.map(|r| r.0),
            user_email: row.user_email,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_template_defaults() {
        let template: NewPromptTemplate =
            serde_json::from_value(json!({"name": "intro", "content": "Hello {name}"})).unwrap();
        assert!(template.variables.is_empty());
        assert!(template.category.is_none());
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let template = NewPromptTemplate {
            name: "  ".into(),
            content: "body".into(),
            ..Default::default()
        };
        assert!(template.validate().is_err());

        let patch = TemplatePatch {
            content: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(TemplatePatch::default().is_empty());
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let patch: TemplatePatch =
            serde_json::from_value(serde_json::json!({"category": null, "domain": "ethics"}))
                .unwrap();
        assert_eq!(patch.category, Some(None));
        assert_eq!(patch.domain, Some(Some("ethics".to_string())));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());

        let untouched: TemplatePatch = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(untouched.category.is_none());
        assert!(untouched.is_empty());
    }
}

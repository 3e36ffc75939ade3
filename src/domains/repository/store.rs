//! Prompt repository port.

use async_trait::async_trait;

use super::error::RepositoryError;
use super::models::{
    NewHistoryEntry, NewPromptTemplate, PromptHistoryEntry, PromptTemplate, TemplateFilter,
    TemplatePatch,
};

/// Storage for prompt templates and their usage history.
///
/// Lookups that find nothing return `Ok(None)`; only backend failures are
/// errors.
#[async_trait]
pub trait PromptRepository: Send + Sync {
    async fn create_template(
        &self,
        template: NewPromptTemplate,
    ) -> Result<PromptTemplate, RepositoryError>;

    async fn get_template(&self, id: &str) -> Result<Option<PromptTemplate>, RepositoryError>;

    async fn get_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PromptTemplate>, RepositoryError>;

    /// Templates matching `filter`, ordered by name.
    async fn list_templates(
        &self,
        filter: &TemplateFilter,
    ) -> Result<Vec<PromptTemplate>, RepositoryError>;

    /// Apply `patch` and return the updated template, or `None` if `id` is unknown.
    async fn update_template(
        &self,
        id: &str,
        patch: TemplatePatch,
    ) -> Result<Option<PromptTemplate>, RepositoryError>;

    /// Returns whether a template was deleted.
    async fn delete_template(&self, id: &str) -> Result<bool, RepositoryError>;

    async fn record_usage(
        &self,
        entry: NewHistoryEntry,
    ) -> Result<PromptHistoryEntry, RepositoryError>;

    /// Most recent uses of a template first.
    async fn get_history(
        &self,
        template_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<PromptHistoryEntry>, RepositoryError>;

    /// Most recent uses by a user first.
    async fn get_user_history(
        &self,
        user_email: &str,
        limit: Option<u32>,
    ) -> Result<Vec<PromptHistoryEntry>, RepositoryError>;
}

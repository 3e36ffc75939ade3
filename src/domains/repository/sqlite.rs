//! SQLite prompt repository.
//!
//! Templates and history live in two tables created by the embedded
//! migrations in `migrations/`. JSON columns (`variables`, `context`,
//! `result`) are stored as TEXT through `sqlx::types::Json`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::error::RepositoryError;
use super::models::{
    DEFAULT_HISTORY_LIMIT, HistoryRow, NewHistoryEntry, NewPromptTemplate, PromptHistoryEntry,
    PromptTemplate, TemplateFilter, TemplatePatch, TemplateRow,
};
use super::store::PromptRepository;
use crate::core::config::DatabaseConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const TEMPLATE_COLUMNS: &str =
    "id, name, content, category, domain, variables, created_at, updated_at";
const HISTORY_COLUMNS: &str =
    "id, template_id, content, domain, context, variables, result, user_email, created_at";

fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| {
        error!(operation, error = %e, "Prompt repository operation failed");
        RepositoryError::database(operation, e.to_string())
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// `PromptRepository` backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqlitePromptRepository {
    pool: SqlitePool,
}

impl SqlitePromptRepository {
    /// Open the database described by `config` and apply pending migrations.
    ///
    /// In-memory databases are per-connection, so their pool is pinned to a
    /// single connection that is never recycled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(db_error("connect"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_memory_url(&config.url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(db_error("connect"))?;

        let repository = Self::from_pool(pool);
        repository.migrate().await?;
        info!("Prompt repository ready");
        Ok(repository)
    }

    /// Wrap an existing pool. Call [`migrate`](Self::migrate) before use.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        MIGRATOR.run(&self.pool).await.map_err(|e| {
            error!(error = %e, "Prompt repository migration failed");
            RepositoryError::database("migrate", e.to_string())
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_history(
        &self,
        operation: &'static str,
        column: &str,
        value: &str,
        limit: Option<u32>,
    ) -> Result<Vec<PromptHistoryEntry>, RepositoryError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let sql = format!(
            "SELECT {HISTORY_COLUMNS} FROM prompt_history WHERE {column} = ?1 \
             ORDER BY created_at DESC, rowid DESC LIMIT ?2"
        );

        let rows = sqlx::query_as::<_, HistoryRow>(&sql)
            .bind(value)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(operation))?;

        Ok(rows.into_iter().map(PromptHistoryEntry::from).collect())
    }
}

#[async_trait]
impl PromptRepository for SqlitePromptRepository {
    #[instrument(skip(self, template), fields(name = %template.name))]
    async fn create_template(
        &self,
        template: NewPromptTemplate,
    ) -> Result<PromptTemplate, RepositoryError> {
        template.validate()?;

        let now = Utc::now();
        let created = PromptTemplate {
            id: Uuid::new_v4().to_string(),
            name: template.name.trim().to_string(),
            content: template.content,
            category: template.category,
            domain: template.domain,
            variables: template.variables,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO prompt_templates \
             (id, name, content, category, domain, variables, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&created.id)
        .bind(&created.name)
        .bind(&created.content)
        .bind(&created.category)
        .bind(&created.domain)
        .bind(Json(&created.variables))
        .bind(created.created_at)
        .bind(created.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("create_template"))?;

        debug!(id = %created.id, "Created prompt template");
        Ok(created)
    }

    async fn get_template(&self, id: &str) -> Result<Option<PromptTemplate>, RepositoryError> {
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM prompt_templates WHERE id = ?1");
        let row = sqlx::query_as::<_, TemplateRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("get_template"))?;

        Ok(row.map(PromptTemplate::from))
    }

    async fn get_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PromptTemplate>, RepositoryError> {
        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM prompt_templates WHERE name = ?1");
        let row = sqlx::query_as::<_, TemplateRow>(&sql)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("get_template_by_name"))?;

        Ok(row.map(PromptTemplate::from))
    }

    async fn list_templates(
        &self,
        filter: &TemplateFilter,
    ) -> Result<Vec<PromptTemplate>, RepositoryError> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = filter.limit.map(i64::from).unwrap_or(-1);
        let sql = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM prompt_templates \
             WHERE (?1 IS NULL OR category = ?1) AND (?2 IS NULL OR domain = ?2) \
             ORDER BY name ASC LIMIT ?3"
        );

        let rows = sqlx::query_as::<_, TemplateRow>(&sql)
            .bind(&filter.category)
            .bind(&filter.domain)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list_templates"))?;

        Ok(rows.into_iter().map(PromptTemplate::from).collect())
    }

    #[instrument(skip(self, patch))]
    async fn update_template(
        &self,
        id: &str,
        patch: TemplatePatch,
    ) -> Result<Option<PromptTemplate>, RepositoryError> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get_template(id).await;
        }

        // Nullable columns take a "was set" flag so a patch can clear them.
        let result = sqlx::query(
            "UPDATE prompt_templates SET \
             name = COALESCE(?1, name), \
             content = COALESCE(?2, content), \
             category = CASE WHEN ?3 THEN ?4 ELSE category END, \
             domain = CASE WHEN ?5 THEN ?6 ELSE domain END, \
             variables = COALESCE(?7, variables), \
             updated_at = ?8 \
             WHERE id = ?9",
        )
        .bind(patch.name.as_deref().map(str::trim))
        .bind(patch.content)
        .bind(patch.category.is_some())
        .bind(patch.category.flatten())
        .bind(patch.domain.is_some())
        .bind(patch.domain.flatten())
        .bind(patch.variables.map(Json))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("update_template"))?;

        if result.rows_affected() == 0 {
            debug!("No prompt template with id {}", id);
            return Ok(None);
        }

        self.get_template(id).await
    }

    async fn delete_template(&self, id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM prompt_templates WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete_template"))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, entry), fields(template_id = ?entry.template_id))]
    async fn record_usage(
        &self,
        entry: NewHistoryEntry,
    ) -> Result<PromptHistoryEntry, RepositoryError> {
        entry.validate()?;

        if let Some(template_id) = entry.template_id.as_deref() {
            if self.get_template(template_id).await?.is_none() {
                warn!(template_id, "Usage recorded against a missing template");
                return Err(RepositoryError::invalid_input(
                    "template_id",
                    format!("no prompt template with id '{}'", template_id),
                ));
            }
        }

        let recorded = PromptHistoryEntry {
            id: Uuid::new_v4().to_string(),
            template_id: entry.template_id,
            content: entry.content,
            domain: entry.domain,
            context: entry.context,
            variables: entry.variables,
            result: entry.result,
            user_email: entry.user_email,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO prompt_history \
             (id, template_id, content, domain, context, variables, result, user_email, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&recorded.id)
        .bind(&recorded.template_id)
        .bind(&recorded.content)
        .bind(&recorded.domain)
        .bind(recorded.context.as_ref().map(Json))
        .bind(Json(&recorded.variables))
        .bind(recorded.result.as_ref().map(Json))
        .bind(&recorded.user_email)
        .bind(recorded.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("record_usage"))?;

        debug!(id = %recorded.id, "Recorded prompt usage");
        Ok(recorded)
    }

    async fn get_history(
        &self,
        template_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<PromptHistoryEntry>, RepositoryError> {
        self.fetch_history("get_history", "template_id", template_id, limit)
            .await
    }

    async fn get_user_history(
        &self,
        user_email: &str,
        limit: Option<u32>,
    ) -> Result<Vec<PromptHistoryEntry>, RepositoryError> {
        self.fetch_history("get_user_history", "user_email", user_email, limit)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use serde_json::json;
    use tempfile::TempDir;

    async fn memory_repository() -> SqlitePromptRepository {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
        };
        SqlitePromptRepository::connect(&config).await.unwrap()
    }

    fn new_template(name: &str, category: Option<&str>, domain: Option<&str>) -> NewPromptTemplate {
        NewPromptTemplate {
            name: name.to_string(),
            content: format!("Template {name} for {{user}}"),
            category: category.map(str::to_string),
            domain: domain.map(str::to_string),
            variables: vec!["user".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_and_get_template() {
        let repo = memory_repository().await;
        let created = repo
            .create_template(new_template("intro", Some("challenge"), None))
            .await
            .unwrap();

        let fetched = repo.get_template(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "intro");
        assert_eq!(fetched.variables, vec!["user"]);
        assert_eq!(fetched.category.as_deref(), Some("challenge"));

        let by_name = repo.get_template_by_name("intro").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
    }

    #[tokio::test]
    async fn test_missing_template_is_none() {
        let repo = memory_repository().await;
        assert!(repo.get_template("missing").await.unwrap().is_none());
        assert!(repo.get_template_by_name("missing").await.unwrap().is_none());
        assert!(!repo.delete_template("missing").await.unwrap());
        assert!(
            repo.update_template(
                "missing",
                TemplatePatch {
                    content: Some("x".into()),
                    ..Default::default()
                }
            )
            .await
            .unwrap()
            .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_is_db_error() {
        let repo = memory_repository().await;
        repo.create_template(new_template("intro", None, None))
            .await
            .unwrap();
        let err = repo
            .create_template(new_template("intro", None, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DbError);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_before_insert() {
        let repo = memory_repository().await;
        let err = repo
            .create_template(new_template(" ", None, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[tokio::test]
    async fn test_list_templates_with_filters() {
        let repo = memory_repository().await;
        repo.create_template(new_template("b", Some("challenge"), Some("ethics")))
            .await
            .unwrap();
        repo.create_template(new_template("a", Some("challenge"), Some("creativity")))
            .await
            .unwrap();
        repo.create_template(new_template("c", Some("evaluation"), Some("ethics")))
            .await
            .unwrap();

        let all = repo.list_templates(&TemplateFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let challenges = repo
            .list_templates(&TemplateFilter {
                category: Some("challenge".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(challenges.len(), 2);

        let ethics_challenges = repo
            .list_templates(&TemplateFilter {
                category: Some("challenge".into()),
                domain: Some("ethics".into()),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(ethics_challenges.len(), 1);
        assert_eq!(ethics_challenges[0].name, "b");

        let limited = repo
            .list_templates(&TemplateFilter {
                limit: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_update_template_is_partial() {
        let repo = memory_repository().await;
        let created = repo
            .create_template(new_template("intro", Some("challenge"), Some("ethics")))
            .await
            .unwrap();

        let updated = repo
            .update_template(
                &created.id,
                TemplatePatch {
                    content: Some("New body".into()),
                    variables: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, "New body");
        assert!(updated.variables.is_empty());
        assert_eq!(updated.name, "intro");
        assert_eq!(updated.domain.as_deref(), Some("ethics"));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_can_clear_nullable_fields() {
        let repo = memory_repository().await;
        let created = repo
            .create_template(new_template("intro", Some("challenge"), Some("ethics")))
            .await
            .unwrap();

        let updated = repo
            .update_template(
                &created.id,
                TemplatePatch {
                    category: Some(None),
                    domain: Some(Some("design".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.category, None);
        assert_eq!(updated.domain.as_deref(), Some("design"));

        let untouched = repo
            .update_template(
                &created.id,
                TemplatePatch {
                    name: Some("renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.category, None);
        assert_eq!(untouched.domain.as_deref(), Some("design"));
    }

    #[tokio::test]
    async fn test_usage_for_unknown_template_is_rejected() {
        let repo = memory_repository().await;
        let err = repo
            .record_usage(NewHistoryEntry {
                template_id: Some("no-such-template".into()),
                content: "Rendered prompt".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("no-such-template"));

        assert!(repo.get_history("no-such-template", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_template() {
        let repo = memory_repository().await;
        let created = repo
            .create_template(new_template("intro", None, None))
            .await
            .unwrap();

        assert!(repo.delete_template(&created.id).await.unwrap());
        assert!(repo.get_template(&created.id).await.unwrap().is_none());
        assert!(!repo.delete_template(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_record_and_read_history() {
        let repo = memory_repository().await;
        let template = repo
            .create_template(new_template("intro", None, None))
            .await
            .unwrap();

        for i in 0..3 {
            repo.record_usage(NewHistoryEntry {
                template_id: Some(template.id.clone()),
                content: format!("rendered {i}"),
                context: Some(json!({"attempt": i})),
                result: Some(json!({"score": 80 + i})),
                user_email: Some("ada@example.com".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        }
        repo.record_usage(NewHistoryEntry {
            content: "ad hoc".into(),
            user_email: Some("grace@example.com".into()),
            ..Default::default()
        })
        .await
        .unwrap();

        let history = repo.get_history(&template.id, None).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "rendered 2");
        assert_eq!(history[0].context, Some(json!({"attempt": 2})));
        assert!(history[0].variables.is_empty());

        let limited = repo.get_history(&template.id, Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);

        let grace = repo
            .get_user_history("grace@example.com", None)
            .await
            .unwrap();
        assert_eq!(grace.len(), 1);
        assert_eq!(grace[0].template_id, None);
        assert_eq!(grace[0].result, None);
    }

    #[tokio::test]
    async fn test_deleting_template_keeps_history() {
        let repo = memory_repository().await;
        let template = repo
            .create_template(new_template("intro", None, None))
            .await
            .unwrap();
        repo.record_usage(NewHistoryEntry {
            template_id: Some(template.id.clone()),
            content: "rendered".into(),
            user_email: Some("ada@example.com".into()),
            ..Default::default()
        })
        .await
        .unwrap();

        repo.delete_template(&template.id).await.unwrap();

        let history = repo.get_user_history("ada@example.com", None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].template_id, None);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompts.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: 2,
        };

        let repo = SqlitePromptRepository::connect(&config).await.unwrap();
        let created = repo
            .create_template(new_template("intro", None, None))
            .await
            .unwrap();
        repo.close().await;
        assert!(path.exists());

        let reopened = SqlitePromptRepository::connect(&config).await.unwrap();
        let fetched = reopened.get_template(&created.id).await.unwrap();
        assert_eq!(fetched.map(|t| t.name), Some("intro".to_string()));
    }

    #[tokio::test]
    async fn test_unopenable_database_is_db_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("prompts.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: 1,
        };
        let err = SqlitePromptRepository::connect(&config).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DbError);
    }
}

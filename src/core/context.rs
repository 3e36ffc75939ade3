//! Shared application state handed to every tool.

use std::sync::Arc;

use super::config::Config;
use super::error::Result;
use crate::domains::prompts::PromptService;
use crate::domains::repository::{PromptRepository, SqlitePromptRepository};

/// Services shared by the MCP handler and the tools.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub prompts: Arc<PromptService>,
    pub repository: Arc<dyn PromptRepository>,
}

impl AppContext {
    /// Build a context around an already-opened repository.
    pub fn new(config: Config, repository: Arc<dyn PromptRepository>) -> Self {
        let prompts = Arc::new(PromptService::new(config.prompts.clone()));
        Self {
            config: Arc::new(config),
            prompts,
            repository,
        }
    }

    /// Open the configured database and build the context.
    pub async fn connect(config: Config) -> Result<Self> {
        let repository = SqlitePromptRepository::connect(&config.database).await?;
        Ok(Self::new(config, Arc::new(repository)))
    }
}

#[cfg(test)]
impl AppContext {
    /// Context backed by a fresh in-memory database.
    pub(crate) async fn in_memory() -> Self {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        Self::connect(config).await.unwrap()
    }
}

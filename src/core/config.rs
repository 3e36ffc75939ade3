//! Configuration management for the prompt server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use crate::domains::prompts::PromptType;
use crate::domains::prompts::types::FALLBACK_MODEL;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

/// Default SQLite database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://assessment_prompts.db";

/// Default size of the database connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Main configuration structure for the prompt server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Prompt repository configuration.
    pub database: DatabaseConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Model used for prompt types without a more specific recommendation.
    pub default_model: String,

    /// Per-type model overrides, keyed by prompt type (e.g. `focus-area`).
    #[serde(default)]
    pub model_overrides: HashMap<String, String>,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            default_model: FALLBACK_MODEL.to_string(),
            model_overrides: HashMap::new(),
        }
    }
}

/// Configuration for the prompt repository.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://prompts.db` or `sqlite::memory:`.
    pub url: String,

    /// Maximum pooled connections. Ignored for in-memory databases.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Custom Debug implementation to redact credentials from logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &redact_url(&self.url))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Replace the `user:password@` part of a URL, if any.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((_, host)) => format!("{}://[REDACTED]@{}", scheme, host),
        None => url.to_string(),
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "assessment-prompt-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            prompts: PromptsConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

/// Environment variable holding the model override for `prompt_type`,
/// e.g. `MCP_MODEL_FOCUS_AREA`.
pub fn model_override_var(prompt_type: PromptType) -> String {
    format!(
        "MCP_MODEL_{}",
        prompt_type.as_str().to_uppercase().replace('-', "_")
    )
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_DATABASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(model) = std::env::var("MCP_DEFAULT_MODEL") {
            config.prompts.default_model = model;
        }

        for prompt_type in PromptType::ALL {
            if let Ok(model) = std::env::var(model_override_var(prompt_type)) {
                info!("Model override for '{}': {}", prompt_type, model);
                config
                    .prompts
                    .model_overrides
                    .insert(prompt_type.as_str().to_string(), model);
            }
        }

        if let Ok(url) = std::env::var("MCP_DATABASE_URL") {
            config.database.url = url;
        } else {
            info!(
                "MCP_DATABASE_URL not set - using {}",
                DEFAULT_DATABASE_URL
            );
        }

        if let Ok(max) = std::env::var("MCP_DB_MAX_CONNECTIONS") {
            match max.parse() {
                Ok(max) => config.database.max_connections = max,
                Err(_) => warn!(
                    "Invalid MCP_DB_MAX_CONNECTIONS '{}', using {}",
                    max, DEFAULT_MAX_CONNECTIONS
                ),
            }
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

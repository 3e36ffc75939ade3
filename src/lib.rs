//! Assessment Prompt Server
//!
//! An MCP server that builds LLM prompts for an AI-assisted human-skills
//! assessment application and stores reusable prompt templates with their
//! usage history.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the shared [`core::AppContext`], the MCP
//!   server handler and the transports
//! - **domains**:
//!   - **prompts**: prompt types, parameter validation, builders, the builder
//!     registry and [`domains::prompts::PromptService`]
//!   - **repository**: prompt templates and history on SQLite
//!   - **tools**: the MCP tools exposed to clients
//!
//! # Example
//!
//! ```rust,no_run
//! use assessment_prompt_server::core::{AppContext, Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let ctx = AppContext::connect(config.clone()).await?;
//!     let server = McpServer::new(ctx);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{AppContext, Config, Error, McpServer, Result};

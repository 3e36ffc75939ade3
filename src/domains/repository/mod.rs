//! Repository domain module.
//!
//! Persistence for prompt templates and the history of prompts sent to the
//! model. The `PromptRepository` trait is the seam the tools talk to;
//! `SqlitePromptRepository` is the production implementation.
//!
//! ## Architecture
//!
//! - `store.rs` - The `PromptRepository` trait
//! - `sqlite.rs` - SQLite implementation with embedded migrations
//! - `models.rs` - Stored records and their inputs
//! - `error.rs` - Repository-specific error types

mod error;
pub mod models;
pub mod sqlite;
mod store;

pub use error::RepositoryError;
pub use models::{
    NewHistoryEntry, NewPromptTemplate, PromptHistoryEntry, PromptTemplate, TemplateFilter,
    TemplatePatch,
};
pub use sqlite::SqlitePromptRepository;
pub use store::PromptRepository;

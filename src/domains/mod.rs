//! Domains module containing business logic organized by bounded contexts.
//!
//! - **prompts**: prompt types, validators, builders and the prompt service
//! - **repository**: persisted prompt templates and usage history
//! - **tools**: MCP tools wrapping the two domains above

pub mod prompts;
pub mod repository;
pub mod tools;

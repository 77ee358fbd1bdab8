//! Socratic Common Library
//!
//! Shared code for the Socratic gateway:
//! - Configuration management
//! - Error types and handling
//! - Metrics and observability
//! - Socratic tutor over a hosted chat-completion provider
//! - Learning-resource search across YouTube, Medium and GeeksforGeeks

pub mod config;
pub mod errors;
pub mod metrics;
pub mod resources;
pub mod tutor;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use resources::{ResourceAggregator, ResourcesResponse, SearchSource};
pub use tutor::{ChatModel, ConversationHistory, ConversationTurn, Tutor};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

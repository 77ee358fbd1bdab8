//! Socratic tutor
//!
//! Turns a student query plus the caller's conversation history into one
//! chat-completion call and returns the reply with the history extended by
//! exactly one turn. Provider failures are returned to the caller unchanged;
//! there is no retry and no fallback reply.

mod history;
mod llm;
pub mod prompt;

pub use history::{ConversationHistory, ConversationTurn};
pub use llm::OpenAiCompatibleChat;

use crate::errors::Result;
use crate::metrics;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Trait for chat-completion providers
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate the assistant reply for the given messages
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Reply plus the extended history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorReply {
    pub response: String,
    pub history: ConversationHistory,
}

/// Socratic tutor over any chat model
#[derive(Clone)]
pub struct Tutor {
    model: Arc<dyn ChatModel>,
}

impl Tutor {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Answer `student_query` in the context of `history`
    pub async fn respond(
        &self,
        student_query: &str,
        history: ConversationHistory,
    ) -> Result<TutorReply> {
        let start = Instant::now();
        let messages = prompt::build_messages(student_query, &history);

        let result = self.model.complete(&messages).await;
        let elapsed = start.elapsed();
        metrics::record_tutor(elapsed.as_secs_f64(), self.model.model_name(), result.is_ok());

        let response = result?;

        tracing::info!(
            model = %self.model.model_name(),
            prior_turns = history.len(),
            latency_ms = elapsed.as_millis() as u64,
            "Tutor turn completed"
        );

        let history = history.with_turn(ConversationTurn::new(student_query, response.clone()));
        Ok(TutorReply { response, history })
    }
}

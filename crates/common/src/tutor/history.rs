//! Conversation history owned by the caller

use serde::{Deserialize, Serialize};

/// One student/assistant exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub student: String,
    pub assistant: String,
}

impl ConversationTurn {
    pub fn new(student: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            student: student.into(),
            assistant: assistant.into(),
        }
    }
}

/// Chronological sequence of turns.
///
/// Serializes as a plain JSON array. The server never keeps a copy: it is
/// received with a request and handed back, one turn longer, in the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory(Vec<ConversationTurn>);

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the history and return it with `turn` appended
    pub fn with_turn(mut self, turn: ConversationTurn) -> Self {
        self.0.push(turn);
        self
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.0.last()
    }
}

impl From<Vec<ConversationTurn>> for ConversationHistory {
    fn from(turns: Vec<ConversationTurn>) -> Self {
        Self(turns)
    }
}

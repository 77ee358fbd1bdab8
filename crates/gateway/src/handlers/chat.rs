//! Socratic chat handler

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::extract::ValidJson;
use crate::AppState;
use socratic_common::{
    errors::{AppError, Result},
    tutor::{ConversationHistory, TutorReply},
};

/// Chat request: the new student message plus everything said so far
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000))]
    pub query: String,

    #[serde(default)]
    pub history: ConversationHistory,
}

/// Run one tutoring turn. Provider failures surface as error responses.
pub async fn chat(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ChatRequest>,
) -> Result<Json<TutorReply>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::validation("query", "Query cannot be empty"));
    }

    let reply = state.tutor.respond(query, request.history).await?;
    Ok(Json(reply))
}

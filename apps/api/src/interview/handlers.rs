//! Axum route handlers for the Interview Chat API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::interview::chat::{validate_history, ChatRequest, ChatResponse};
use crate::setup::validation::validate_config;
use crate::state::AppState;

/// POST /api/v1/interview/chat
///
/// Stateless chat turn: the caller supplies the whole history and the
/// candidate profile; an empty history yields the opening greeting.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate_config(&request.config)?;
    validate_history(&request.messages)?;

    let response = state
        .interviewer
        .reply(&request.messages, &request.config)
        .await?;

    Ok(Json(ChatResponse { response }))
}

//! Axum route handlers for the Coding Questions API.

use axum::{extract::State, Json};

use crate::coding::questions::{QuestionRequest, QuestionSet};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/coding/questions
///
/// Returns a tailored problem set. An unusable model reply yields an empty
/// list rather than an error; upstream failures are surfaced.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionSet>, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }

    let questions = state.questions.generate(&request).await?;

    Ok(Json(QuestionSet { questions }))
}

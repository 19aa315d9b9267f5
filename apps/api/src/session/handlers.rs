//! Axum route handlers for the Sessions API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::coding::round::SubmitOutcome;
use crate::errors::AppError;
use crate::models::report::InterviewReport;
use crate::session::controller::SessionSnapshot;
use crate::session::service::{self, RunOutcome, StartSessionRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub fragment: String,
}

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub code: String,
}

/// POST /api/v1/sessions
///
/// Starts a chat interview (greeting included) or a coding round.
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let snapshot = service::start_session(&state, request).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service::get_snapshot(&state, id).await?))
}

/// POST /api/v1/sessions/:id/answers
///
/// 409 while the interviewer is still replying or after the interview ends.
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service::submit_answer(&state, id, &request.text).await?))
}

/// POST /api/v1/sessions/:id/speech
pub async fn handle_push_speech(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SpeechRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service::push_speech(&state, id, &request.fragment).await?))
}

/// POST /api/v1/sessions/:id/speech/finish
pub async fn handle_finish_speech(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service::finish_speech(&state, id).await?))
}

/// POST /api/v1/sessions/:id/tts
pub async fn handle_set_tts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TtsRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service::set_tts(&state, id, request.enabled).await?))
}

/// POST /api/v1/sessions/:id/end
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewReport>, AppError> {
    Ok(Json(service::end_session(&state, id).await?))
}

/// GET /api/v1/sessions/:id/report
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewReport>, AppError> {
    Ok(Json(service::get_report(&state, id).await?))
}

/// POST /api/v1/sessions/:id/coding/select
pub async fn handle_select_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service::select_problem(&state, id, request.index).await?))
}

/// PUT /api/v1/sessions/:id/coding/draft
pub async fn handle_update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(service::update_draft(&state, id, request.code).await?))
}

/// POST /api/v1/sessions/:id/coding/run
pub async fn handle_run_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RunOutcome>, AppError> {
    Ok(Json(service::run_code(&state, id).await?))
}

/// POST /api/v1/sessions/:id/coding/submit
pub async fn handle_submit_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitOutcome>, AppError> {
    Ok(Json(service::submit_problem(&state, id).await?))
}

/// POST /api/v1/sessions/:id/coding/finish
pub async fn handle_finish_coding(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewReport>, AppError> {
    Ok(Json(service::finish_coding(&state, id).await?))
}

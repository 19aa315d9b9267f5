//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::models::ats::AtsResult;
use crate::setup::resume::{analyze_resume, AnalyzeRequest};
use crate::setup::upload::{read_resume_upload, UploadedResume};
use crate::state::AppState;

/// POST /api/v1/resume/analyze
///
/// Scores the resume against the target role. Unparseable model output
/// yields the default result; only upstream failures are errors.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AtsResult>, AppError> {
    let result = analyze_resume(
        &state.llm,
        &request.resume_text,
        request.target_role.as_deref(),
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/resume/upload
///
/// Multipart upload of a .txt or .pdf resume; returns its text so the
/// client can place it in the session config.
pub async fn handle_upload_resume(multipart: Multipart) -> Result<Json<UploadedResume>, AppError> {
    let uploaded = read_resume_upload(multipart).await?;
    Ok(Json(uploaded))
}

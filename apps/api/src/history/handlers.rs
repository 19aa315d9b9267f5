//! Axum route handlers for the History API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::history::summary::{summarize, HistorySummary};
use crate::models::history::HistoryEntry;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub summary: HistorySummary,
}

/// GET /api/v1/history
///
/// Returns every completed session, oldest first, with aggregate stats.
pub async fn handle_get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let entries = state.history.read().await?;
    let summary = summarize(&entries);
    Ok(Json(HistoryResponse { entries, summary }))
}

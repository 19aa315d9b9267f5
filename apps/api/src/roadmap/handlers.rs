//! Axum route handlers for the Roadmap API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::roadmap::Roadmap;
use crate::roadmap::generator::{generate_roadmap, RoadmapRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoadmapResponse {
    pub roadmap: Roadmap,
}

/// POST /api/v1/roadmap
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let roadmap = generate_roadmap(&state.llm, &request).await?;
    Ok(Json(RoadmapResponse { roadmap }))
}

pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::coding::handlers as coding;
use crate::history::handlers as history;
use crate::interview::handlers as interview;
use crate::roadmap::handlers as roadmap;
use crate::session::handlers as sessions;
use crate::setup::handlers as setup;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless AI endpoints
        .route("/api/v1/interview/chat", post(interview::handle_chat))
        .route("/api/v1/resume/analyze", post(setup::handle_analyze_resume))
        .route("/api/v1/resume/upload", post(setup::handle_upload_resume))
        .route(
            "/api/v1/coding/questions",
            post(coding::handle_generate_questions),
        )
        .route("/api/v1/roadmap", post(roadmap::handle_generate_roadmap))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_start_session))
        .route("/api/v1/sessions/:id", get(sessions::handle_get_session))
        .route(
            "/api/v1/sessions/:id/answers",
            post(sessions::handle_submit_answer),
        )
        .route(
            "/api/v1/sessions/:id/speech",
            post(sessions::handle_push_speech),
        )
        .route(
            "/api/v1/sessions/:id/speech/finish",
            post(sessions::handle_finish_speech),
        )
        .route("/api/v1/sessions/:id/tts", post(sessions::handle_set_tts))
        .route("/api/v1/sessions/:id/end", post(sessions::handle_end_session))
        .route(
            "/api/v1/sessions/:id/report",
            get(sessions::handle_get_report),
        )
        .route(
            "/api/v1/sessions/:id/coding/select",
            post(sessions::handle_select_problem),
        )
        .route(
            "/api/v1/sessions/:id/coding/draft",
            put(sessions::handle_update_draft),
        )
        .route(
            "/api/v1/sessions/:id/coding/run",
            post(sessions::handle_run_code),
        )
        .route(
            "/api/v1/sessions/:id/coding/submit",
            post(sessions::handle_submit_problem),
        )
        .route(
            "/api/v1/sessions/:id/coding/finish",
            post(sessions::handle_finish_coding),
        )
        // History
        .route("/api/v1/history", get(history::handle_get_history))
        .with_state(state)
}

//! Session operations. Remote calls and timers run unlocked on their own
//! tasks and race the session's cancellation token, so anything arriving
//! after the session ends is dropped without touching state. History
//! appends run under the session lock, so a report is recorded at most once.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::coding::questions::{load_questions, QuestionRequest};
use crate::coding::round::{CodingRound, SubmitOutcome};
use crate::errors::AppError;
use crate::history::entry_for;
use crate::interview::session::{InterviewSession, TurnOutcome};
use crate::llm_client::ChatMessage;
use crate::models::ats::AtsResult;
use crate::models::interview::{InterviewConfig, InterviewType};
use crate::models::report::InterviewReport;
use crate::session::controller::{Round, SessionController, SessionSnapshot};
use crate::session::registry::SessionHandle;
use crate::setup::validation::validate_config;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    pub config: InterviewConfig,
    #[serde(default)]
    pub ats_result: Option<AtsResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub success: bool,
    pub message: String,
}

/// Creates a session. Chat sessions fetch their greeting before returning;
/// coding sessions load their problem set.
pub async fn start_session(
    state: &AppState,
    request: StartSessionRequest,
) -> Result<SessionSnapshot, AppError> {
    validate_config(&request.config)?;
    let StartSessionRequest { config, ats_result } = request;

    let round = if config.interview_type == InterviewType::Coding {
        let question_request = QuestionRequest {
            role: config.role.clone(),
            level: config.interview_level,
            field: config.interest_field.clone(),
        };
        let (questions, origin) = load_questions(state.questions.as_ref(), &question_request).await;
        Round::Coding(CodingRound::new(questions, origin))
    } else {
        Round::Chat(InterviewSession::new())
    };
    let is_chat = matches!(round, Round::Chat(_));

    let controller = SessionController::new(
        config.clone(),
        ats_result,
        round,
        state.config.score_seed,
    );
    let id = controller.id();
    let token = controller.cancel_token();
    state.sessions.prune(state.config.session_ttl).await;
    let handle = state.sessions.insert(controller).await;
    info!(
        "Session {id} started: {} interview for {}",
        config.interview_type.as_str(),
        config.role
    );

    if is_chat {
        spawn_exchange(state, &handle, Vec::new(), config, token).await?;
    }

    let snapshot = handle.lock().await.snapshot();
    Ok(snapshot)
}

pub async fn get_snapshot(state: &AppState, id: Uuid) -> Result<SessionSnapshot, AppError> {
    let handle = state.sessions.get(id).await?;
    let snapshot = handle.lock().await.snapshot();
    Ok(snapshot)
}

/// Submits a typed answer and waits for the interviewer's reply.
pub async fn submit_answer(
    state: &AppState,
    id: Uuid,
    text: &str,
) -> Result<SessionSnapshot, AppError> {
    let handle = state.sessions.get(id).await?;
    let (history, config, token) = {
        let mut ctl = handle.lock().await;
        let history = ctl.chat_mut()?.begin_turn(text)?;
        (history, ctl.config().clone(), ctl.cancel_token())
    };

    spawn_exchange(state, &handle, history, config, token).await?;

    let snapshot = handle.lock().await.snapshot();
    Ok(snapshot)
}

pub async fn push_speech(
    state: &AppState,
    id: Uuid,
    fragment: &str,
) -> Result<SessionSnapshot, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut ctl = handle.lock().await;
    ctl.chat_mut()?.push_speech(fragment)?;
    Ok(ctl.snapshot())
}

/// Submits whatever speech has been buffered. An empty buffer submits nothing.
pub async fn finish_speech(state: &AppState, id: Uuid) -> Result<SessionSnapshot, AppError> {
    let handle = state.sessions.get(id).await?;
    let prepared = {
        let mut ctl = handle.lock().await;
        let config = ctl.config().clone();
        let token = ctl.cancel_token();
        let chat = ctl.chat_mut()?;
        match chat.take_speech()? {
            Some(text) => Some((chat.begin_turn(&text)?, config, token)),
            None => None,
        }
    };

    match prepared {
        Some((history, config, token)) => {
            spawn_exchange(state, &handle, history, config, token).await?;
        }
        None => debug!("Session {id}: speech finished with nothing recognized"),
    }

    let snapshot = handle.lock().await.snapshot();
    Ok(snapshot)
}

pub async fn set_tts(state: &AppState, id: Uuid, enabled: bool) -> Result<SessionSnapshot, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut ctl = handle.lock().await;
    ctl.chat_mut()?.set_tts(enabled);
    Ok(ctl.snapshot())
}

/// Ends the session now. Yields the fixed partial report unless a report
/// already exists, in which case that report is returned and nothing new
/// is recorded.
pub async fn end_session(state: &AppState, id: Uuid) -> Result<InterviewReport, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut ctl = handle.lock().await;
    let (report, is_new) = ctl.end_early();
    if is_new {
        info!("Session {id} ended early");
    }
    record(state, &mut ctl, &report).await;
    Ok(report)
}

pub async fn get_report(state: &AppState, id: Uuid) -> Result<InterviewReport, AppError> {
    let handle = state.sessions.get(id).await?;
    let ctl = handle.lock().await;
    ctl.report()
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Report for session {id} is not ready yet")))
}

pub async fn select_problem(
    state: &AppState,
    id: Uuid,
    index: usize,
) -> Result<SessionSnapshot, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut ctl = handle.lock().await;
    ctl.coding_mut()?.select(index)?;
    Ok(ctl.snapshot())
}

pub async fn update_draft(
    state: &AppState,
    id: Uuid,
    code: String,
) -> Result<SessionSnapshot, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut ctl = handle.lock().await;
    ctl.coding_mut()?.update_draft(code)?;
    Ok(ctl.snapshot())
}

/// Simulated run: nothing is executed, success is reported after a pause.
pub async fn run_code(state: &AppState, id: Uuid) -> Result<RunOutcome, AppError> {
    let handle = state.sessions.get(id).await?;
    let token = {
        let mut ctl = handle.lock().await;
        if ctl.coding_mut()?.is_finished() {
            return Err(AppError::Conflict("coding round is already finished".to_string()));
        }
        ctl.cancel_token()
    };

    tokio::select! {
        _ = token.cancelled() => {
            Err(AppError::Conflict("session ended while the code was running".to_string()))
        }
        _ = tokio::time::sleep(state.config.run_delay) => Ok(RunOutcome {
            success: true,
            message: "Code executed successfully!".to_string(),
        }),
    }
}

pub async fn submit_problem(state: &AppState, id: Uuid) -> Result<SubmitOutcome, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut ctl = handle.lock().await;
    let outcome = ctl.coding_mut()?.submit_current()?;
    info!("Session {id}: submitted '{}'", outcome.title);
    Ok(outcome)
}

/// Closes the coding round, builds its report and records it. Finishing
/// again returns the same report.
pub async fn finish_coding(state: &AppState, id: Uuid) -> Result<InterviewReport, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut ctl = handle.lock().await;
    let report = ctl.complete_coding_report()?;
    info!("Session {id}: coding round finished with score {}", report.overall_score);
    record(state, &mut ctl, &report).await;
    Ok(report)
}

/// Appends the report to history unless it is already there. A failed
/// append is logged; the next end or finish tries again.
async fn record(state: &AppState, ctl: &mut SessionController, report: &InterviewReport) {
    if ctl.is_recorded() {
        return;
    }
    match state.history.append(entry_for(ctl.config(), report)).await {
        Ok(_) => ctl.mark_recorded(),
        Err(e) => error!("Session {}: failed to record report, will retry: {e}", ctl.id()),
    }
}

/// Runs one exchange on its own task so the turn always settles, even when
/// the request that started it is dropped.
async fn spawn_exchange(
    state: &AppState,
    handle: &SessionHandle,
    history: Vec<ChatMessage>,
    config: InterviewConfig,
    token: CancellationToken,
) -> Result<(), AppError> {
    let state = state.clone();
    let handle = handle.clone();
    tokio::spawn(async move { exchange(&state, &handle, history, &config, token).await })
        .await
        .map_err(|e| AppError::Internal(anyhow!("interviewer exchange task failed: {e}")))?
}

/// One chat round trip: ask the interviewer, then record the reply (or the
/// failure notice). A completed interview schedules its report.
async fn exchange(
    state: &AppState,
    handle: &SessionHandle,
    history: Vec<ChatMessage>,
    config: &InterviewConfig,
    token: CancellationToken,
) -> Result<(), AppError> {
    let result = tokio::select! {
        _ = token.cancelled() => {
            debug!("Session ended while awaiting the interviewer; reply dropped");
            return Ok(());
        }
        result = state.interviewer.reply(&history, config) => result,
    };

    let mut ctl = handle.lock().await;
    let id = ctl.id();
    let chat = ctl.chat_mut()?;
    match result {
        Ok(reply) => match chat.complete_turn(&reply) {
            TurnOutcome::Continue => {}
            TurnOutcome::Complete => {
                info!("Session {id}: interview complete, report in {:?}", state.config.report_delay);
                schedule_report(state.clone(), handle.clone(), token);
            }
            TurnOutcome::Discarded => debug!("Session {id}: late reply discarded"),
        },
        Err(e) => {
            warn!("Session {id}: interviewer call failed: {e}");
            chat.fail_turn(notice_for(&e));
        }
    }
    Ok(())
}

/// Waits out the report delay, then synthesizes and records the report.
/// Ending the session during the delay cancels this.
fn schedule_report(state: AppState, handle: SessionHandle, token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(state.config.report_delay) => {}
        }

        let mut ctl = handle.lock().await;
        if let Some(report) = ctl.complete_chat_report() {
            record(&state, &mut ctl, &report).await;
        }
    });
}

fn notice_for(err: &AppError) -> String {
    match err {
        AppError::RateLimited => "Rate limit exceeded. Please wait a moment and try again.",
        AppError::PaymentRequired => "AI credits exhausted. Please add credits to continue.",
        _ => "Failed to get a response from the interviewer. Please try again.",
    }
    .to_string()
}

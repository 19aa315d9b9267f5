//! Per-session state: profile, round (chat or coding), the one report the
//! session will ever produce, and the cancellation token that fences off
//! work still running when the session ends.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::coding::questions::QuestionOrigin;
use crate::coding::round::{CodingRound, ProblemStatus, RoundError};
use crate::errors::AppError;
use crate::interview::session::{InterviewSession, SessionPhase, TurnError};
use crate::models::ats::AtsResult;
use crate::models::coding::CodingQuestion;
use crate::models::interview::{InterviewConfig, InterviewType, Message};
use crate::models::report::InterviewReport;
use crate::report::synthesizer::{
    partial_report, synthesize_coding_report, synthesize_transcript_report,
};

/// Sessions that never reach a recorded report are dropped after this long.
pub const ABANDONED_AFTER: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
pub enum Round {
    Chat(InterviewSession),
    Coding(CodingRound),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSnapshot {
    pub transcript: Vec<Message>,
    pub questions_asked: u32,
    /// True while the interviewer is composing a reply.
    pub typing: bool,
    pub notice: Option<String>,
    pub tts_enabled: bool,
    pub speech_cue: Option<String>,
    pub speech_preview: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodingSnapshot {
    pub origin: QuestionOrigin,
    pub current_index: usize,
    pub current_question: CodingQuestion,
    pub current_draft: String,
    pub problems: Vec<ProblemStatus>,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub interview_type: InterviewType,
    pub phase: SessionPhase,
    pub elapsed_secs: u64,
    pub report_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<CodingSnapshot>,
}

pub struct SessionController {
    id: Uuid,
    config: InterviewConfig,
    ats_result: Option<AtsResult>,
    round: Round,
    report: Option<InterviewReport>,
    /// Set once the report is in the history log.
    recorded: bool,
    ended: bool,
    started_at: Instant,
    closed_at: Option<Instant>,
    cancel: CancellationToken,
    rng: StdRng,
}

impl SessionController {
    pub fn new(
        config: InterviewConfig,
        ats_result: Option<AtsResult>,
        round: Round,
        score_seed: Option<u64>,
    ) -> Self {
        let rng = match score_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            id: Uuid::new_v4(),
            config,
            ats_result,
            round,
            report: None,
            recorded: false,
            ended: false,
            started_at: Instant::now(),
            closed_at: None,
            cancel: CancellationToken::new(),
            rng,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    pub fn report(&self) -> Option<&InterviewReport> {
        self.report.as_ref()
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn mark_recorded(&mut self) {
        self.recorded = true;
    }

    /// A recorded session expires `ttl` after it closed. Anything else is
    /// kept until it has been open for `ABANDONED_AFTER`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        match self.closed_at {
            Some(at) if self.recorded => at.elapsed() >= ttl,
            _ => self.started_at.elapsed() >= ABANDONED_AFTER,
        }
    }

    fn store_report(&mut self, report: InterviewReport) {
        self.report = Some(report);
        self.closed_at = Some(Instant::now());
    }

    /// Child of the session token; cancelled when the session ends.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    pub fn chat_mut(&mut self) -> Result<&mut InterviewSession, AppError> {
        match &mut self.round {
            Round::Chat(chat) => Ok(chat),
            Round::Coding(_) => Err(AppError::Conflict(
                "this session is a coding round, not a chat interview".to_string(),
            )),
        }
    }

    pub fn coding_mut(&mut self) -> Result<&mut CodingRound, AppError> {
        match &mut self.round {
            Round::Coding(round) => Ok(round),
            Round::Chat(_) => Err(AppError::Conflict(
                "this session has no coding round".to_string(),
            )),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.round {
            Round::Chat(chat) => chat.phase(),
            Round::Coding(_) if self.ended => SessionPhase::Ended,
            Round::Coding(_) if self.report.is_some() => SessionPhase::Completed,
            Round::Coding(_) => SessionPhase::Idle,
        }
    }

    /// Builds the transcript report once the chat has wound down. Returns
    /// `None` when there is nothing to do: the session was ended early or
    /// a report already exists.
    pub fn complete_chat_report(&mut self) -> Option<InterviewReport> {
        if self.report.is_some() {
            return None;
        }
        let Round::Chat(chat) = &mut self.round else {
            return None;
        };
        if chat.phase() != SessionPhase::GeneratingReport {
            return None;
        }

        let report =
            synthesize_transcript_report(chat.transcript(), self.ats_result.clone(), &mut self.rng);
        chat.mark_completed();
        self.store_report(report.clone());
        Some(report)
    }

    /// Closes the coding round and builds its report. Finishing again
    /// returns the same report.
    pub fn complete_coding_report(&mut self) -> Result<InterviewReport, AppError> {
        if self.ended {
            return Err(AppError::Conflict("session has already ended".to_string()));
        }
        if let Some(report) = &self.report {
            return Ok(report.clone());
        }
        let result = self.coding_mut()?.finish()?;
        let report = synthesize_coding_report(&result, self.ats_result.clone());
        self.store_report(report.clone());
        Ok(report)
    }

    /// Early termination. Returns the session's report and whether this
    /// call produced it.
    pub fn end_early(&mut self) -> (InterviewReport, bool) {
        self.cancel.cancel();
        if let Some(report) = &self.report {
            return (report.clone(), false);
        }

        match &mut self.round {
            Round::Chat(chat) => chat.end(),
            Round::Coding(round) => round.close(),
        }
        self.ended = true;
        let report = partial_report(self.ats_result.clone());
        self.store_report(report.clone());
        (report, true)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (chat, coding) = match &self.round {
            Round::Chat(chat) => (
                Some(ChatSnapshot {
                    transcript: chat.transcript().to_vec(),
                    questions_asked: chat.questions_asked(),
                    typing: chat.phase().is_in_flight(),
                    notice: chat.notice().map(str::to_string),
                    tts_enabled: chat.tts_enabled(),
                    speech_cue: chat.speech_cue().map(str::to_string),
                    speech_preview: chat.speech_preview().to_string(),
                }),
                None,
            ),
            Round::Coding(round) => (
                None,
                Some(CodingSnapshot {
                    origin: round.origin(),
                    current_index: round.current_index(),
                    current_question: round.current_question().clone(),
                    current_draft: round.current_draft().to_string(),
                    problems: round.statuses(),
                    score: round.score(),
                }),
            ),
        };

        SessionSnapshot {
            id: self.id,
            interview_type: self.config.interview_type,
            phase: self.phase(),
            elapsed_secs: self.started_at.elapsed().as_secs(),
            report_ready: self.report.is_some(),
            chat,
            coding,
        }
    }
}

impl From<TurnError> for AppError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::EmptyAnswer => AppError::Validation(err.to_string()),
            TurnError::Busy | TurnError::Closed => AppError::Conflict(err.to_string()),
        }
    }
}

impl From<RoundError> for AppError {
    fn from(err: RoundError) -> Self {
        match err {
            RoundError::OutOfRange { .. } => AppError::Validation(err.to_string()),
            RoundError::Finished => AppError::Conflict(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::questions::default_questions;
    use crate::interview::chat::tests::sample_config;

    fn chat_controller() -> SessionController {
        SessionController::new(
            sample_config(InterviewType::Technical),
            None,
            Round::Chat(InterviewSession::new()),
            Some(1),
        )
    }

    fn coding_controller() -> SessionController {
        SessionController::new(
            sample_config(InterviewType::Coding),
            Some(AtsResult::fallback()),
            Round::Coding(CodingRound::new(default_questions(), QuestionOrigin::BuiltIn)),
            Some(1),
        )
    }

    fn finish_chat(ctl: &mut SessionController) {
        let chat = ctl.chat_mut().unwrap();
        chat.complete_turn("Hello!");
        chat.begin_turn("I built a database system").unwrap();
        chat.complete_turn("Thanks, the interview is now complete.");
    }

    #[test]
    fn test_chat_report_produced_once() {
        let mut ctl = chat_controller();
        assert!(ctl.complete_chat_report().is_none());

        finish_chat(&mut ctl);
        let report = ctl.complete_chat_report().unwrap();
        assert_eq!(report.answers.len(), 1);
        assert_eq!(ctl.phase(), SessionPhase::Completed);
        assert!(ctl.complete_chat_report().is_none());
    }

    #[test]
    fn test_end_early_wins_over_pending_report() {
        let mut ctl = chat_controller();
        finish_chat(&mut ctl);
        let token = ctl.cancel_token();

        let (report, is_new) = ctl.end_early();
        assert!(is_new);
        assert_eq!(report.overall_score, 50);
        assert!(token.is_cancelled());
        assert_eq!(ctl.phase(), SessionPhase::Ended);
        // the delayed synthesis finds nothing to do
        assert!(ctl.complete_chat_report().is_none());
    }

    #[test]
    fn test_end_after_report_returns_existing_report() {
        let mut ctl = chat_controller();
        finish_chat(&mut ctl);
        let report = ctl.complete_chat_report().unwrap();

        let (again, is_new) = ctl.end_early();
        assert!(!is_new);
        assert_eq!(again.overall_score, report.overall_score);
        assert_eq!(ctl.phase(), SessionPhase::Completed);
    }

    #[test]
    fn test_coding_report_and_phase() {
        let mut ctl = coding_controller();
        assert_eq!(ctl.phase(), SessionPhase::Idle);
        ctl.coding_mut().unwrap().submit_current().unwrap();
        ctl.coding_mut().unwrap().submit_current().unwrap();

        let report = ctl.complete_coding_report().unwrap();
        assert_eq!(report.overall_score, 67);
        assert!(report.ats_result.is_some());
        assert_eq!(ctl.phase(), SessionPhase::Completed);

        // finishing again hands back the same report
        let again = ctl.complete_coding_report().unwrap();
        assert_eq!(again.overall_score, 67);
        assert!(ctl.coding_mut().unwrap().submit_current().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_requires_recorded_report() {
        let ttl = Duration::from_secs(60);
        let mut ctl = chat_controller();
        tokio::time::advance(ttl * 2).await;
        assert!(!ctl.is_expired(ttl));

        ctl.end_early();
        tokio::time::advance(ttl * 2).await;
        assert!(!ctl.is_expired(ttl));

        ctl.mark_recorded();
        assert!(ctl.is_expired(ttl));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_session_expires() {
        let ctl = chat_controller();
        tokio::time::advance(ABANDONED_AFTER - Duration::from_secs(1)).await;
        assert!(!ctl.is_expired(Duration::from_secs(60)));
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(ctl.is_expired(Duration::from_secs(60)));
    }

    #[test]
    fn test_coding_end_early_closes_round() {
        let mut ctl = coding_controller();
        let (report, is_new) = ctl.end_early();
        assert!(is_new);
        assert!(report.answers.is_empty());
        assert_eq!(ctl.phase(), SessionPhase::Ended);
        assert!(ctl.coding_mut().unwrap().submit_current().is_err());
    }

    #[test]
    fn test_round_kind_mismatch_is_conflict() {
        let mut ctl = chat_controller();
        assert!(matches!(ctl.coding_mut(), Err(AppError::Conflict(_))));
        let mut ctl = coding_controller();
        assert!(matches!(ctl.chat_mut(), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_snapshot_shapes() {
        let ctl = chat_controller();
        let snap = ctl.snapshot();
        assert_eq!(snap.phase, SessionPhase::AwaitingGreeting);
        assert!(snap.chat.as_ref().unwrap().typing);
        assert!(snap.coding.is_none());

        let ctl = coding_controller();
        let snap = ctl.snapshot();
        let coding = snap.coding.unwrap();
        assert_eq!(coding.problems.len(), 3);
        assert_eq!(coding.current_question.title, "Two Sum");
        assert!(!snap.report_ready);
    }

    #[test]
    fn test_turn_errors_map_to_http_errors() {
        assert!(matches!(AppError::from(TurnError::Busy), AppError::Conflict(_)));
        assert!(matches!(
            AppError::from(TurnError::EmptyAnswer),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(RoundError::OutOfRange { index: 9, total: 3 }),
            AppError::Validation(_)
        ));
    }
}

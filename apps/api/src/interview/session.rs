//! Turn-taking state machine for one chat interview.
//!
//! awaiting_greeting → idle ⇄ awaiting_reply → generating_report → completed
//!
//! `ended` is reachable from any phase (early termination). The machine is
//! synchronous; the caller performs the network call between `begin_turn`
//! and `complete_turn` / `fail_turn` without holding any lock.

use serde::Serialize;
use thiserror::Error;

use crate::interview::chat::to_chat_history;
use crate::interview::prompts::COMPLETION_PHRASE;
use crate::interview::speech::TranscriptBuffer;
use crate::llm_client::ChatMessage;
use crate::models::interview::Message;

/// Completed answer/reply exchanges after which the interview closes.
/// Turns whose reply failed do not count.
pub const MAX_ROUND_TRIPS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    AwaitingGreeting,
    Idle,
    AwaitingReply,
    GeneratingReport,
    Completed,
    Ended,
}

impl SessionPhase {
    /// True while a chat request is outstanding ("AI is typing").
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionPhase::AwaitingGreeting | SessionPhase::AwaitingReply)
    }

    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            SessionPhase::GeneratingReport | SessionPhase::Completed | SessionPhase::Ended
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TurnError {
    #[error("answer is empty")]
    EmptyAnswer,

    #[error("the interviewer is still responding")]
    Busy,

    #[error("the interview has finished")]
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Reply recorded; waiting for the candidate.
    Continue,
    /// Reply recorded and the interview is over; a report is due.
    Complete,
    /// The reply arrived after the session left the in-flight phase.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct InterviewSession {
    transcript: Vec<Message>,
    phase: SessionPhase,
    questions_asked: u32,
    answers_given: u32,
    round_trips: u32,
    notice: Option<String>,
    tts_enabled: bool,
    speech_cue: Option<String>,
    speech: TranscriptBuffer,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            phase: SessionPhase::AwaitingGreeting,
            questions_asked: 0,
            answers_given: 0,
            round_trips: 0,
            notice: None,
            tts_enabled: true,
            speech_cue: None,
            speech: TranscriptBuffer::default(),
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    pub fn answers_given(&self) -> u32 {
        self.answers_given
    }

    /// Candidate answers that received an interviewer reply.
    pub fn round_trips(&self) -> u32 {
        self.round_trips
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn tts_enabled(&self) -> bool {
        self.tts_enabled
    }

    /// Latest interviewer line to read aloud, when text-to-speech is on.
    pub fn speech_cue(&self) -> Option<&str> {
        self.speech_cue.as_deref()
    }

    pub fn speech_preview(&self) -> &str {
        self.speech.preview()
    }

    /// Records a candidate answer and returns the history to send.
    pub fn begin_turn(&mut self, text: &str) -> Result<Vec<ChatMessage>, TurnError> {
        if self.phase.is_closed() {
            return Err(TurnError::Closed);
        }
        if self.phase.is_in_flight() {
            return Err(TurnError::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(TurnError::EmptyAnswer);
        }

        self.transcript.push(Message::candidate(text));
        self.answers_given += 1;
        self.phase = SessionPhase::AwaitingReply;
        self.notice = None;
        self.speech_cue = None;
        self.speech.clear();

        Ok(to_chat_history(&self.transcript))
    }

    /// Records the interviewer's reply (greeting or answer to a turn) and
    /// applies the termination policy.
    pub fn complete_turn(&mut self, reply: &str) -> TurnOutcome {
        if !self.phase.is_in_flight() {
            return TurnOutcome::Discarded;
        }

        // the greeting answers nothing
        if self.phase == SessionPhase::AwaitingReply {
            self.round_trips += 1;
        }
        self.transcript.push(Message::interviewer(reply));
        self.questions_asked += 1;
        if self.tts_enabled {
            self.speech_cue = Some(reply.to_string());
        }

        if is_completion_reply(reply) || self.round_trips >= MAX_ROUND_TRIPS {
            self.phase = SessionPhase::GeneratingReport;
            TurnOutcome::Complete
        } else {
            self.phase = SessionPhase::Idle;
            TurnOutcome::Continue
        }
    }

    /// A failed call returns the session to idle with a visible notice.
    /// Returns false when the failure arrived too late to matter.
    pub fn fail_turn(&mut self, notice: impl Into<String>) -> bool {
        if !self.phase.is_in_flight() {
            return false;
        }
        self.phase = SessionPhase::Idle;
        self.notice = Some(notice.into());
        true
    }

    pub fn mark_completed(&mut self) {
        if self.phase == SessionPhase::GeneratingReport {
            self.phase = SessionPhase::Completed;
        }
    }

    /// Early termination from any phase.
    pub fn end(&mut self) {
        self.phase = SessionPhase::Ended;
        self.speech.clear();
    }

    pub fn set_tts(&mut self, enabled: bool) {
        self.tts_enabled = enabled;
        if !enabled {
            self.speech_cue = None;
        }
    }

    pub fn push_speech(&mut self, fragment: &str) -> Result<(), TurnError> {
        if self.phase.is_closed() {
            return Err(TurnError::Closed);
        }
        self.speech.push(fragment);
        Ok(())
    }

    /// Drains buffered speech for submission. The buffer is kept if the
    /// interviewer is still responding, so nothing heard is lost.
    pub fn take_speech(&mut self) -> Result<Option<String>, TurnError> {
        if self.phase.is_closed() {
            return Err(TurnError::Closed);
        }
        if self.phase.is_in_flight() {
            return Err(TurnError::Busy);
        }
        Ok(self.speech.take())
    }
}

pub fn is_completion_reply(reply: &str) -> bool {
    reply.to_lowercase().contains(COMPLETION_PHRASE)
}

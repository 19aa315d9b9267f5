//! Interview chat: the remote chat endpoint and its in-process seam.
//!
//! `InterviewChat` is what the session orchestrator talks to. The default
//! backend, `LlmInterviewer`, wraps the transcript in the interviewer system
//! prompt and forwards it to the model gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::prompts::{
    EMPTY_REPLY_FALLBACK, INTERVIEWER_SYSTEM_TEMPLATE, OPENING_TURN, RESUME_EXCERPT_CHARS,
};
use crate::llm_client::{ChatMessage, ChatRole, LlmClient};
use crate::models::interview::{InterviewConfig, Message, Speaker};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub config: InterviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[async_trait]
pub trait InterviewChat: Send + Sync {
    /// Produces the interviewer's next line for the given history.
    /// An empty history asks for the opening greeting.
    async fn reply(&self, history: &[ChatMessage], config: &InterviewConfig)
        -> Result<String, AppError>;
}

pub struct LlmInterviewer(pub LlmClient);

#[async_trait]
impl InterviewChat for LlmInterviewer {
    async fn reply(
        &self,
        history: &[ChatMessage],
        config: &InterviewConfig,
    ) -> Result<String, AppError> {
        info!(
            "Interview chat for {} ({}), {} prior turns",
            config.name,
            config.interview_type.as_str(),
            history.len()
        );
        let messages = build_gateway_messages(history, config);
        let response = self
            .0
            .chat(&messages)
            .await
            .map_err(|e| AppError::from_llm("Interview chat failed", e))?;

        Ok(response
            .text()
            .map(str::to_string)
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
    }
}

/// Renders the interviewer persona for this candidate.
pub fn build_system_prompt(config: &InterviewConfig) -> String {
    let resume_line = if config.resume.trim().is_empty() {
        String::new()
    } else {
        let excerpt: String = config.resume.chars().take(RESUME_EXCERPT_CHARS).collect();
        format!("- Resume Summary: {excerpt}\n")
    };

    INTERVIEWER_SYSTEM_TEMPLATE
        .replace("{interview_type}", config.interview_type.as_str())
        .replace("{role}", &config.role)
        .replace("{name}", &config.name)
        .replace("{branch}", &config.branch)
        .replace("{experience_level}", &config.experience_level)
        .replace("{interest_field}", &config.interest_field)
        .replace("{interview_level}", config.interview_level.as_str())
        .replace("{resume_line}", &resume_line)
}

/// System prompt first, then the history (or the opening turn when empty).
pub fn build_gateway_messages(history: &[ChatMessage], config: &InterviewConfig) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(build_system_prompt(config)));
    if history.is_empty() {
        messages.push(ChatMessage::user(OPENING_TURN));
    } else {
        messages.extend(history.iter().cloned());
    }
    messages
}

/// Maps the transcript to gateway roles: interviewer → assistant, candidate → user.
pub fn to_chat_history(transcript: &[Message]) -> Vec<ChatMessage> {
    transcript
        .iter()
        .map(|m| match m.role {
            Speaker::Interviewer => ChatMessage::assistant(m.content.clone()),
            Speaker::Candidate => ChatMessage::user(m.content.clone()),
        })
        .collect()
}

/// Client-supplied history may only hold user/assistant turns.
pub fn validate_history(history: &[ChatMessage]) -> Result<(), AppError> {
    if history.iter().any(|m| m.role == ChatRole::System) {
        return Err(AppError::Validation(
            "messages may only contain 'user' and 'assistant' roles".to_string(),
        ));
    }
    Ok(())
}

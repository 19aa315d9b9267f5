use std::sync::Arc;

use crate::coding::questions::QuestionSource;
use crate::config::Config;
use crate::history::HistoryLog;
use crate::interview::chat::InterviewChat;
use crate::llm_client::LlmClient;
use crate::session::registry::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
    /// Pluggable interviewer. Default: LlmInterviewer over the model gateway.
    pub interviewer: Arc<dyn InterviewChat>,
    /// Pluggable coding problem source. Default: LlmQuestionGenerator.
    pub questions: Arc<dyn QuestionSource>,
    pub history: HistoryLog,
    pub sessions: SessionRegistry,
}

#[cfg(test)]
impl AppState {
    /// In-memory state with the given seams and an unreachable gateway.
    pub fn for_tests(
        interviewer: Arc<dyn InterviewChat>,
        questions: Arc<dyn QuestionSource>,
    ) -> Self {
        use crate::history::store::MemoryStore;

        let config = Config::for_tests(std::env::temp_dir().join("prepcoach-tests"));
        let llm = LlmClient::new(config.llm_api_key.clone(), config.llm_api_url.clone())
            .expect("test LLM client");
        AppState {
            config,
            llm,
            interviewer,
            questions,
            history: HistoryLog::new(Arc::new(MemoryStore::default())),
            sessions: SessionRegistry::default(),
        }
    }
}

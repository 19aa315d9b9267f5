// Session Orchestrator: transcript, turn-taking against the interview chat
// endpoint, termination policy. One request in flight per session.

pub mod chat;
pub mod handlers;
pub mod prompts;
pub mod session;
pub mod speech;

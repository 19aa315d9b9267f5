// Coding Round Orchestrator: problem set (generated or built-in), per-problem
// drafts and submissions, completion score. Code is never executed or judged.

pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod round;

// Learning roadmap generation. Independent of interview sessions.

pub mod generator;
pub mod handlers;
pub mod prompts;

// Interview setup: candidate profile validation, resume upload and the
// one-shot ATS analysis of the resume.

pub mod handlers;
pub mod prompts;
pub mod resume;
pub mod upload;
pub mod validation;

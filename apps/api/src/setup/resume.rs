//! One-shot ATS analysis of the candidate's resume.
//!
//! The model's reply is never trusted: the first-`{`-to-last-`}` span is
//! parsed and range-checked, and anything unusable becomes
//! `AtsResult::fallback()`. Only upstream failures are errors.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{extract_json_object, LlmClient, LlmError};
use crate::models::ats::AtsResult;
use crate::setup::prompts::{RESUME_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYST_PERSONA};

/// Shorter resumes (after trimming) are rejected before any model call.
pub const MIN_RESUME_CHARS: usize = 50;

pub const DEFAULT_TARGET_ROLE: &str = "General";

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub target_role: Option<String>,
}

pub async fn analyze_resume(
    llm: &LlmClient,
    resume_text: &str,
    target_role: Option<&str>,
) -> Result<AtsResult, AppError> {
    if resume_text.trim().chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(
            "Resume text is too short. Please provide more content.".to_string(),
        ));
    }

    let role = target_role
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_TARGET_ROLE);
    info!("Analyzing resume for role: {role}");

    let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE
        .replace("{target_role}", role)
        .replace("{resume_text}", resume_text);

    let text = match llm.call(&prompt, &json_system(RESUME_ANALYST_PERSONA)).await {
        Ok(text) => text,
        Err(LlmError::EmptyContent) => {
            warn!("Resume analysis came back empty; using default result");
            return Ok(AtsResult::fallback());
        }
        Err(e) => return Err(AppError::from_llm("Resume analysis failed", e)),
    };

    let result = parse_ats_response(&text);
    info!("Resume analysis complete, ATS score: {}", result.ats_score);
    Ok(result)
}

/// Recovers an `AtsResult` from free-form model output, or the default.
pub fn parse_ats_response(text: &str) -> AtsResult {
    let Some(json) = extract_json_object(text) else {
        warn!("No JSON object in resume analysis reply; using default result");
        return AtsResult::fallback();
    };

    let result: AtsResult = match serde_json::from_str(json) {
        Ok(result) => result,
        Err(e) => {
            warn!("Resume analysis did not match schema ({e}); using default result");
            return AtsResult::fallback();
        }
    };

    if let Err(reason) = result.validate() {
        warn!("Resume analysis rejected: {reason}; using default result");
        return AtsResult::fallback();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"Here is my analysis:
    {
      "ats_score": 82,
      "keyword_match_percent": 71,
      "missing_keywords": ["Kubernetes"],
      "formatting_issues": [],
      "improvements": ["Quantify the migration project"],
      "role_compatibility_score": 78,
      "strengths": ["Clear skills section"],
      "summary": "Strong backend profile."
    }
    Let me know if you need anything else."#;

    #[test]
    fn test_parse_ats_response_from_wrapped_json() {
        let result = parse_ats_response(REPLY);
        assert_eq!(result.ats_score, 82);
        assert_eq!(result.missing_keywords, vec!["Kubernetes".to_string()]);
        assert!(result.formatting_issues.is_empty());
    }

    #[test]
    fn test_non_json_reply_yields_default() {
        let result = parse_ats_response("I'm sorry, I can't read that resume.");
        assert_eq!(result, AtsResult::fallback());
    }

    #[test]
    fn test_out_of_range_score_yields_default() {
        let reply = REPLY.replace("\"ats_score\": 82", "\"ats_score\": 140");
        assert_eq!(parse_ats_response(&reply), AtsResult::fallback());
    }

    #[test]
    fn test_missing_field_yields_default() {
        let reply = r#"{"ats_score": 90, "summary": "ok"}"#;
        assert_eq!(parse_ats_response(reply), AtsResult::fallback());
    }

    #[tokio::test]
    async fn test_short_resume_rejected_before_any_call() {
        // unroutable gateway: reaching it would produce an Llm error, not Validation
        let llm = LlmClient::new("k".to_string(), "http://127.0.0.1:9/v1".to_string()).unwrap();
        let padded = format!("   {}   ", "x".repeat(MIN_RESUME_CHARS - 1));
        let err = analyze_resume(&llm, &padded, Some("SDE")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

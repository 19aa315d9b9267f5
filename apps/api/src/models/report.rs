use serde::{Deserialize, Serialize};

use crate::models::ats::AtsResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Fixed-shape performance report. Exactly one is produced per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReport {
    pub technical_score: u32,
    pub communication_score: u32,
    pub problem_solving_score: u32,
    pub confidence_score: u32,
    pub overall_score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_result: Option<AtsResult>,
    pub answers: Vec<QaPair>,
}

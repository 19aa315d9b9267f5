use serde::{Deserialize, Serialize};

/// Resume screening result produced once per session by the resume analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    pub ats_score: u32,
    pub keyword_match_percent: u32,
    pub missing_keywords: Vec<String>,
    pub formatting_issues: Vec<String>,
    pub improvements: Vec<String>,
    pub role_compatibility_score: u32,
    pub strengths: Vec<String>,
    pub summary: String,
}

impl AtsResult {
    /// Substituted whenever the model's analysis cannot be parsed or validated.
    pub fn fallback() -> Self {
        Self {
            ats_score: 65,
            keyword_match_percent: 60,
            missing_keywords: vec!["Consider adding role-specific keywords".to_string()],
            formatting_issues: vec!["Unable to fully analyze formatting".to_string()],
            improvements: vec![
                "Ensure resume is well-structured".to_string(),
                "Add quantifiable achievements".to_string(),
            ],
            role_compatibility_score: 60,
            strengths: vec!["Resume content provided".to_string()],
            summary: "Resume analysis completed with limited data. \
                Consider providing more detailed content."
                .to_string(),
        }
    }

    /// All percentages must sit in 0–100.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("ats_score", self.ats_score),
            ("keyword_match_percent", self.keyword_match_percent),
            ("role_compatibility_score", self.role_compatibility_score),
        ] {
            if value > 100 {
                return Err(format!("{field} out of range: {value}"));
            }
        }
        Ok(())
    }
}

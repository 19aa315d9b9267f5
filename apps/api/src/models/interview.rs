use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Technical,
    Hr,
    Coding,
    Phone,
}

impl InterviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Technical => "technical",
            InterviewType::Hr => "hr",
            InterviewType::Coding => "coding",
            InterviewType::Phone => "phone",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl InterviewLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewLevel::Beginner => "beginner",
            InterviewLevel::Intermediate => "intermediate",
            InterviewLevel::Advanced => "advanced",
        }
    }
}

/// Candidate profile gathered at setup. Immutable for the life of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub name: String,
    pub branch: String,
    pub role: String,
    pub experience_level: String,
    pub interest_field: String,
    pub interview_type: InterviewType,
    pub interview_level: InterviewLevel,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub resume_file_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Interviewer,
    Candidate,
}

/// One transcript line. The transcript is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Speaker, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn interviewer(content: impl Into<String>) -> Self {
        Self::new(Speaker::Interviewer, content)
    }

    pub fn candidate(content: impl Into<String>) -> Self {
        Self::new(Speaker::Candidate, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes_with_optional_resume() {
        let json = r#"{
            "name": "Asha",
            "branch": "cse",
            "role": "Backend Engineer",
            "experience_level": "fresher",
            "interest_field": "distributed systems",
            "interview_type": "hr",
            "interview_level": "intermediate"
        }"#;
        let config: InterviewConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.interview_type, InterviewType::Hr);
        assert_eq!(config.interview_level, InterviewLevel::Intermediate);
        assert!(config.resume.is_empty());
        assert!(config.resume_file_name.is_none());
    }

    #[test]
    fn test_unknown_interview_type_is_rejected() {
        let json = r#"{
            "name": "A", "branch": "b", "role": "r", "experience_level": "e",
            "interest_field": "f", "interview_type": "panel", "interview_level": "beginner"
        }"#;
        assert!(serde_json::from_str::<InterviewConfig>(json).is_err());
    }
}

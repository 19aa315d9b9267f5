use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingExample {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingQuestion {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<CodingExample>,
    #[serde(default)]
    pub constraints: Vec<String>,
    pub starter_code: String,
    #[serde(default)]
    pub hints: Vec<String>,
}

impl CodingQuestion {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err(format!("question {} has no title", self.id));
        }
        if self.description.trim().is_empty() {
            return Err(format!("question {} has no description", self.id));
        }
        if self.starter_code.trim().is_empty() {
            return Err(format!("question {} has no starter code", self.id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodingAnswer {
    pub question_id: u32,
    pub code: String,
    /// True when submitted. Code is never executed or judged.
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodingResult {
    pub questions: Vec<CodingQuestion>,
    pub answers: Vec<CodingAnswer>,
    pub score: u32,
}

impl CodingResult {
    pub fn question_title(&self, question_id: u32) -> &str {
        self.questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.title.as_str())
            .unwrap_or("")
    }
}

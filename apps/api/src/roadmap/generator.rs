use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::roadmap::Roadmap;
use crate::roadmap::prompts::{ROADMAP_PERSONA, ROADMAP_PROMPT_TEMPLATE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub goal: String,
    pub goal_type: String,
    pub experience_level: String,
}

impl RoadmapRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("goal", &self.goal),
            ("goal_type", &self.goal_type),
            ("experience_level", &self.experience_level),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }
}

/// Generates a phased learning plan. Unlike the other AI calls there is no
/// default roadmap: an unparseable reply is an error.
pub async fn generate_roadmap(llm: &LlmClient, request: &RoadmapRequest) -> Result<Roadmap, AppError> {
    request.validate()?;
    info!(
        "Generating roadmap: goal={}, type={}, level={}",
        request.goal, request.goal_type, request.experience_level
    );

    let prompt = ROADMAP_PROMPT_TEMPLATE
        .replace("{goal}", &request.goal)
        .replace("{goal_type}", &request.goal_type)
        .replace("{experience_level}", &request.experience_level);

    let roadmap: Roadmap = llm
        .call_json(&prompt, &json_system(ROADMAP_PERSONA))
        .await
        .map_err(roadmap_error)?;

    info!("Roadmap generated with {} phases", roadmap.phases.len());
    Ok(roadmap)
}

fn roadmap_error(err: LlmError) -> AppError {
    match err {
        LlmError::Parse(e) => {
            warn!("Failed to parse roadmap JSON: {e}");
            AppError::Llm(format!("Failed to parse roadmap response: {e}"))
        }
        other => AppError::from_llm("Roadmap generation failed", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::strip_json_fences;

    fn parse(text: &str) -> Result<Roadmap, AppError> {
        serde_json::from_str(strip_json_fences(text)).map_err(|e| roadmap_error(LlmError::Parse(e)))
    }

    const ROADMAP: &str = r#"```json
    {
      "title": "Backend Engineer in 6 months",
      "summary": "From fundamentals to production systems.",
      "total_duration": "24 weeks",
      "phases": [
        {
          "id": 1,
          "title": "Foundations",
          "duration": "4 weeks",
          "description": "Language basics.",
          "topics": ["Syntax", "Ownership"],
          "resources": [
            {"name": "The Book", "type": "book", "url": "https://doc.rust-lang.org/book/", "is_free": true},
            {"name": "Exercism", "type": "website"}
          ],
          "milestone": "Write a CLI tool"
        }
      ]
    }
    ```"#;

    #[test]
    fn test_parse_fenced_roadmap() {
        let roadmap = parse(ROADMAP).unwrap();
        assert_eq!(roadmap.phases.len(), 1);
        let resources = &roadmap.phases[0].resources;
        assert_eq!(resources[0].resource_type, "book");
        assert_eq!(resources[0].is_free, Some(true));
        assert_eq!(resources[1].url, None);
        assert!(roadmap.free_resources.is_none());
    }

    #[test]
    fn test_unparseable_roadmap_is_500() {
        let err = parse("Here's your roadmap: step 1, learn.").unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_upstream_limits_keep_their_status() {
        let err = roadmap_error(LlmError::Api {
            status: 402,
            message: "no credits".to_string(),
        });
        assert!(matches!(err, AppError::PaymentRequired));
    }

    #[test]
    fn test_request_requires_every_field() {
        let request = RoadmapRequest {
            goal: "Become a data engineer".to_string(),
            goal_type: " ".to_string(),
            experience_level: "beginner".to_string(),
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(m)) if m.contains("goal_type")));
    }
}

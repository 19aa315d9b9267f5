//! Coding problem sources: pluggable, trait-based, with a built-in fallback set.
//!
//! Default: `LlmQuestionGenerator` (role/level/field-tailored via the model).
//! Any failure, empty set, or schema violation falls back to `default_questions()`.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coding::prompts::{QUESTIONS_PERSONA, QUESTIONS_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::prompts::json_system;
use crate::llm_client::{strip_json_fences, LlmClient};
use crate::models::coding::{CodingExample, CodingQuestion, Difficulty};
use crate::models::interview::InterviewLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub role: String,
    pub level: InterviewLevel,
    pub field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<CodingQuestion>,
}

/// Where a round's problem set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOrigin {
    Generated,
    BuiltIn,
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Returns a validated problem set; an empty vec means "nothing usable".
    async fn generate(&self, request: &QuestionRequest) -> Result<Vec<CodingQuestion>, AppError>;
}

pub struct LlmQuestionGenerator(pub LlmClient);

#[async_trait]
impl QuestionSource for LlmQuestionGenerator {
    async fn generate(&self, request: &QuestionRequest) -> Result<Vec<CodingQuestion>, AppError> {
        info!(
            "Generating coding questions: role={}, level={}, field={}",
            request.role,
            request.level.as_str(),
            request.field
        );
        let prompt = QUESTIONS_PROMPT_TEMPLATE
            .replace("{role}", &request.role)
            .replace("{level}", request.level.as_str())
            .replace("{field}", &request.field);

        let text = self
            .0
            .call(&prompt, &json_system(QUESTIONS_PERSONA))
            .await
            .map_err(|e| AppError::from_llm("Coding question generation failed", e))?;

        Ok(parse_questions(&text))
    }
}

/// Parses and validates a generated problem set. The set is accepted or
/// rejected whole: any invalid question, or duplicate ids, yields an empty vec.
pub fn parse_questions(text: &str) -> Vec<CodingQuestion> {
    let set: QuestionSet = match serde_json::from_str(strip_json_fences(text)) {
        Ok(set) => set,
        Err(e) => {
            warn!("Coding questions were not valid JSON: {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    for question in &set.questions {
        if let Err(reason) = question.validate() {
            warn!("Rejecting generated question set: {reason}");
            return Vec::new();
        }
        if !seen.insert(question.id) {
            warn!("Rejecting generated question set: duplicate id {}", question.id);
            return Vec::new();
        }
    }

    set.questions
}

/// Fetches a tailored set, falling back to the built-in problems on any failure.
/// Never retries.
pub async fn load_questions(
    source: &dyn QuestionSource,
    request: &QuestionRequest,
) -> (Vec<CodingQuestion>, QuestionOrigin) {
    match source.generate(request).await {
        Ok(questions) if !questions.is_empty() => (questions, QuestionOrigin::Generated),
        Ok(_) => {
            warn!("Question source returned no usable problems; using built-in set");
            (default_questions(), QuestionOrigin::BuiltIn)
        }
        Err(e) => {
            warn!("Question source failed ({e}); using built-in set");
            (default_questions(), QuestionOrigin::BuiltIn)
        }
    }
}

fn example(input: &str, output: &str, explanation: Option<&str>) -> CodingExample {
    CodingExample {
        input: input.to_string(),
        output: output.to_string(),
        explanation: explanation.map(String::from),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The built-in three-problem set.
pub fn default_questions() -> Vec<CodingQuestion> {
    vec![
        CodingQuestion {
            id: 1,
            title: "Two Sum".to_string(),
            difficulty: Difficulty::Easy,
            description: "Given an array of integers nums and an integer target, return indices \
                of the two numbers such that they add up to target.\n\nYou may assume that each \
                input would have exactly one solution, and you may not use the same element \
                twice.\n\nYou can return the answer in any order."
                .to_string(),
            examples: vec![
                example(
                    "nums = [2,7,11,15], target = 9",
                    "[0,1]",
                    Some("Because nums[0] + nums[1] == 9, we return [0, 1]."),
                ),
                example("nums = [3,2,4], target = 6", "[1,2]", None),
            ],
            constraints: strings(&[
                "2 <= nums.length <= 10^4",
                "-10^9 <= nums[i] <= 10^9",
                "-10^9 <= target <= 10^9",
            ]),
            starter_code: "function twoSum(nums, target) {\n  // Write your code here\n  \n}"
                .to_string(),
            hints: strings(&[
                "Try using a hash map to store values you've seen",
                "For each number, check if target - num exists in the map",
            ]),
        },
        CodingQuestion {
            id: 2,
            title: "Valid Parentheses".to_string(),
            difficulty: Difficulty::Easy,
            description: "Given a string s containing just the characters '(', ')', '{', '}', \
                '[' and ']', determine if the input string is valid.\n\nAn input string is valid \
                if:\n1. Open brackets must be closed by the same type of brackets.\n2. Open \
                brackets must be closed in the correct order.\n3. Every close bracket has a \
                corresponding open bracket of the same type."
                .to_string(),
            examples: vec![
                example("s = \"()\"", "true", None),
                example("s = \"()[]{}\"", "true", None),
                example("s = \"(]\"", "false", None),
            ],
            constraints: strings(&[
                "1 <= s.length <= 10^4",
                "s consists of parentheses only '()[]{}'",
            ]),
            starter_code: "function isValid(s) {\n  // Write your code here\n  \n}".to_string(),
            hints: strings(&[
                "Use a stack data structure",
                "Push opening brackets, pop and match for closing brackets",
            ]),
        },
        CodingQuestion {
            id: 3,
            title: "Reverse Linked List".to_string(),
            difficulty: Difficulty::Medium,
            description: "Given the head of a singly linked list, reverse the list, and return \
                the reversed list."
                .to_string(),
            examples: vec![
                example("head = [1,2,3,4,5]", "[5,4,3,2,1]", None),
                example("head = [1,2]", "[2,1]", None),
            ],
            constraints: strings(&[
                "The number of nodes in the list is [0, 5000]",
                "-5000 <= Node.val <= 5000",
            ]),
            starter_code: "function reverseList(head) {\n  // ListNode structure: { val: number, \
                next: ListNode | null }\n  // Write your code here\n  \n}"
                .to_string(),
            hints: strings(&[
                "Keep track of previous, current, and next pointers",
                "Iteratively reverse the links",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = r#"```json
    {
      "questions": [
        {
          "id": 1,
          "title": "Merge Intervals",
          "difficulty": "Medium",
          "description": "Merge all overlapping intervals.",
          "examples": [{"input": "[[1,3],[2,6]]", "output": "[[1,6]]"}],
          "constraints": ["1 <= intervals.length <= 10^4"],
          "starter_code": "function merge(intervals) {\n}",
          "hints": ["Sort by start"]
        },
        {
          "id": 2,
          "title": "LRU Cache",
          "difficulty": "Hard",
          "description": "Design an LRU cache.",
          "starter_code": "class LRUCache {}"
        }
      ]
    }
    ```"#;

    struct FixedSource(Result<Vec<CodingQuestion>, ()>);

    #[async_trait]
    impl QuestionSource for FixedSource {
        async fn generate(&self, _: &QuestionRequest) -> Result<Vec<CodingQuestion>, AppError> {
            self.0
                .clone()
                .map_err(|_| AppError::Llm("gateway down".to_string()))
        }
    }

    fn request() -> QuestionRequest {
        QuestionRequest {
            role: "Backend Engineer".to_string(),
            level: InterviewLevel::Advanced,
            field: "databases".to_string(),
        }
    }

    #[test]
    fn test_parse_questions_accepts_fenced_valid_set() {
        let questions = parse_questions(GENERATED);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
        assert!(questions[1].examples.is_empty());
        assert!(questions[1].hints.is_empty());
    }

    #[test]
    fn test_parse_questions_rejects_non_json() {
        assert!(parse_questions("Here are three great problems!").is_empty());
    }

    #[test]
    fn test_parse_questions_rejects_unknown_difficulty() {
        let text = r#"{"questions":[{"id":1,"title":"T","difficulty":"Trivial","description":"D","starter_code":"c"}]}"#;
        assert!(parse_questions(text).is_empty());
    }

    #[test]
    fn test_parse_questions_rejects_whole_set_on_one_invalid_question() {
        let text = r#"{"questions":[
            {"id":1,"title":"T","difficulty":"Easy","description":"D","starter_code":"c"},
            {"id":2,"title":"  ","difficulty":"Easy","description":"D","starter_code":"c"}
        ]}"#;
        assert!(parse_questions(text).is_empty());
    }

    #[test]
    fn test_parse_questions_rejects_duplicate_ids() {
        let text = r#"{"questions":[
            {"id":1,"title":"A","difficulty":"Easy","description":"D","starter_code":"c"},
            {"id":1,"title":"B","difficulty":"Hard","description":"D","starter_code":"c"}
        ]}"#;
        assert!(parse_questions(text).is_empty());
    }

    #[test]
    fn test_default_questions_are_valid() {
        let questions = default_questions();
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.validate().is_ok()));
        let titles: Vec<_> = questions.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, ["Two Sum", "Valid Parentheses", "Reverse Linked List"]);
    }

    #[tokio::test]
    async fn test_load_questions_uses_generated_set() {
        let generated = parse_questions(GENERATED);
        let source = FixedSource(Ok(generated.clone()));
        let (questions, origin) = load_questions(&source, &request()).await;
        assert_eq!(origin, QuestionOrigin::Generated);
        assert_eq!(questions, generated);
    }

    #[tokio::test]
    async fn test_load_questions_falls_back_on_empty() {
        let (questions, origin) = load_questions(&FixedSource(Ok(vec![])), &request()).await;
        assert_eq!(origin, QuestionOrigin::BuiltIn);
        assert_eq!(questions, default_questions());
    }

    #[tokio::test]
    async fn test_load_questions_falls_back_on_error() {
        let (questions, origin) = load_questions(&FixedSource(Err(())), &request()).await;
        assert_eq!(origin, QuestionOrigin::BuiltIn);
        assert_eq!(questions.len(), 3);
    }
}

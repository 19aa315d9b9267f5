/// Persona for coding-question generation. Combined with the JSON-only fragment.
pub const QUESTIONS_PERSONA: &str = "You are a technical interviewer creating coding problems.";

/// Question generation prompt. Replace `{role}`, `{level}`, `{field}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate exactly 3 coding questions appropriate for a {level} level {role} position with interest in {field}.

Difficulty distribution based on level:
- beginner: 2 Easy, 1 Medium
- intermediate: 1 Easy, 2 Medium
- advanced: 1 Medium, 2 Hard

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "id": 1,
      "title": "Problem Title",
      "difficulty": "Easy",
      "description": "Full problem description with clear requirements",
      "examples": [
        {"input": "example input", "output": "expected output", "explanation": "optional explanation"}
      ],
      "constraints": ["constraint 1", "constraint 2"],
      "starter_code": "function solutionName(params) {\n  // Write your code here\n  \n}",
      "hints": ["hint 1", "hint 2"]
    }
  ]
}

RULES:
1. "difficulty" is exactly one of "Easy", "Medium", "Hard"
2. "id" values are unique integers starting at 1
3. Every question has a non-empty title, description and starter_code"#;

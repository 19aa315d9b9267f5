/// Persona for resume screening. Combined with the JSON-only fragment.
pub const RESUME_ANALYST_PERSONA: &str =
    "You are an experienced recruiter who screens resumes for ATS compatibility.";

/// Resume analysis prompt. Replace `{target_role}` and `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this resume for ATS (Applicant Tracking System) compatibility and job fit.

TARGET ROLE: {target_role}

RESUME CONTENT:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "ats_score": <number 0-100>,
  "keyword_match_percent": <number 0-100>,
  "missing_keywords": ["keyword1", "keyword2"],
  "formatting_issues": ["issue1", "issue2"],
  "improvements": ["tip1", "tip2"],
  "role_compatibility_score": <number 0-100>,
  "strengths": ["strength1", "strength2"],
  "summary": "<brief 2-3 sentence analysis>"
}

Evaluate based on:
1. Keyword relevance to the target role
2. ATS-friendly formatting (no tables, complex layouts)
3. Action verbs and quantifiable achievements
4. Skills section clarity
5. Contact information presence
6. Professional summary quality
7. Experience relevance"#;

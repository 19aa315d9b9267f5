/// Persona for roadmap generation. Combined with the JSON-only fragment.
pub const ROADMAP_PERSONA: &str = "You are an expert career and learning advisor.";

/// Roadmap prompt. Replace `{goal}`, `{goal_type}`, `{experience_level}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Generate a detailed learning roadmap for the following:

Goal: {goal}
Goal Type: {goal_type}
Experience Level: {experience_level}

Create a comprehensive roadmap with 5-7 phases. For each phase, provide:
1. Phase title
2. Duration (in weeks)
3. Description (2-3 sentences)
4. 4-6 specific topics/skills to learn
5. 3-4 FREE recommended resources (courses, books, websites) - ONLY include free resources from platforms like:
   - freeCodeCamp, Khan Academy, Coursera (free courses), edX (audit mode)
   - YouTube channels, MDN Web Docs, W3Schools
   - Official documentation, GitHub repositories, free eBooks
   - GeeksforGeeks, LeetCode (free tier), HackerRank
6. A milestone to achieve at the end of this phase

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Roadmap title",
  "summary": "Brief overview of the learning path",
  "total_duration": "Total estimated time",
  "phases": [
    {
      "id": 1,
      "title": "Phase title",
      "duration": "X weeks",
      "description": "Phase description",
      "topics": ["topic1", "topic2", "topic3", "topic4"],
      "resources": [
        {"name": "Resource name", "type": "course/book/website/video", "url": "https://actual-url.com", "is_free": true}
      ],
      "milestone": "What you should be able to do after this phase"
    }
  ],
  "free_resources": [
    {"name": "Top free resource", "type": "platform", "url": "https://url.com", "description": "Brief description of this resource"}
  ]
}"#;

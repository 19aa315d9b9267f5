//! Static text pools for report feedback. Feedback is not derived from content.

pub const TRANSCRIPT_STRENGTHS: &[&str] = &[
    "Clear communication style",
    "Good understanding of fundamentals",
    "Positive attitude and enthusiasm",
];

pub const TRANSCRIPT_WEAKNESSES: &[&str] = &[
    "Could provide more specific examples",
    "Consider elaborating on technical details",
];

pub const TRANSCRIPT_SUGGESTIONS: &[&str] = &[
    "Practice behavioral questions using STAR method",
    "Prepare more project-specific talking points",
    "Research company background before interviews",
];

pub const CODING_STRENGTHS_HIGH: &[&str] = &[
    "Good problem-solving skills",
    "Clean code structure",
    "Completed multiple challenges",
];

pub const CODING_STRENGTHS_LOW: &[&str] = &[
    "Attempted the coding challenges",
    "Made progress on problems",
];

pub const CODING_WEAKNESSES: &[&str] = &[
    "Could complete more challenges",
    "Consider optimizing solutions",
];

pub const CODING_SUGGESTIONS: &[&str] = &[
    "Practice more LeetCode-style problems",
    "Focus on time complexity analysis",
    "Review data structures and algorithms",
];

pub const EARLY_EXIT_STRENGTHS: &[&str] = &["Started the interview process"];

pub const EARLY_EXIT_WEAKNESSES: &[&str] = &["Interview ended early"];

pub const EARLY_EXIT_SUGGESTIONS: &[&str] = &[
    "Complete the full interview for accurate assessment",
    "Practice with more mock interviews",
];

pub fn owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(|s| s.to_string()).collect()
}

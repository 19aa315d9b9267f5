//! Report synthesis for the three ways a session can end.
//!
//! Transcript path:
//!   communication = min(95, 65 + avg_answer_chars / 10)
//!   technical     = min(95, 70 + 2 × (answer, keyword) hits)
//!   problem_solving ∈ [75, 89], confidence ∈ [72, 86] (random)
//!   overall       = round((technical + communication + 75) / 3)
//!
//! Coding path: every score follows the completion percentage.
//! Early exit: every score is 50.

use rand::Rng;

use crate::models::ats::AtsResult;
use crate::models::coding::CodingResult;
use crate::models::interview::{Message, Speaker};
use crate::models::report::{InterviewReport, QaPair};
use crate::report::pools::{self, owned};

pub const TECHNICAL_KEYWORDS: [&str; 9] = [
    "implemented",
    "developed",
    "built",
    "designed",
    "algorithm",
    "system",
    "database",
    "api",
    "framework",
];

const SCORE_CAP: f64 = 95.0;
const TECHNICAL_BASE: u32 = 70;
const TECHNICAL_PER_HIT: u32 = 2;
const COMMUNICATION_BASE: f64 = 65.0;
/// Stand-in for the unmeasured third component of the overall mean.
const OVERALL_ANCHOR: f64 = 75.0;
const PARTIAL_SCORE: u32 = 50;
const CODING_STRENGTH_THRESHOLD: u32 = 70;

/// Pairs each interviewer message with the candidate message directly after it.
/// A trailing interviewer message (unanswered question) never forms a pair.
pub fn extract_qa_pairs(transcript: &[Message]) -> Vec<QaPair> {
    transcript
        .windows(2)
        .filter(|w| w[0].role == Speaker::Interviewer && w[1].role == Speaker::Candidate)
        .map(|w| QaPair {
            question: w[0].content.clone(),
            answer: w[1].content.clone(),
        })
        .collect()
}

/// Mean answer length in characters; 0 when there are no answers.
pub fn average_answer_chars(pairs: &[QaPair]) -> f64 {
    let total: usize = pairs.iter().map(|p| p.answer.chars().count()).sum();
    total as f64 / pairs.len().max(1) as f64
}

pub fn communication_score(avg_answer_chars: f64) -> f64 {
    (COMMUNICATION_BASE + avg_answer_chars / 10.0).min(SCORE_CAP)
}

/// Counts, per answer, each technical keyword it mentions at least once.
pub fn keyword_hits(pairs: &[QaPair]) -> u32 {
    pairs
        .iter()
        .map(|p| {
            let answer = p.answer.to_lowercase();
            TECHNICAL_KEYWORDS
                .iter()
                .filter(|kw| answer.contains(*kw))
                .count() as u32
        })
        .sum()
}

pub fn technical_score(hits: u32) -> u32 {
    TECHNICAL_BASE
        .saturating_add(hits.saturating_mul(TECHNICAL_PER_HIT))
        .min(SCORE_CAP as u32)
}

/// Builds the report for a transcript-driven (chat) session.
pub fn synthesize_transcript_report<R: Rng + ?Sized>(
    transcript: &[Message],
    ats_result: Option<AtsResult>,
    rng: &mut R,
) -> InterviewReport {
    let answers = extract_qa_pairs(transcript);

    let communication = communication_score(average_answer_chars(&answers));
    let technical = technical_score(keyword_hits(&answers));
    let overall = ((technical as f64 + communication + OVERALL_ANCHOR) / 3.0).round() as u32;

    InterviewReport {
        technical_score: technical,
        communication_score: communication.round() as u32,
        problem_solving_score: rng.gen_range(75..=89),
        confidence_score: rng.gen_range(72..=86),
        overall_score: overall,
        strengths: owned(pools::TRANSCRIPT_STRENGTHS),
        weaknesses: owned(pools::TRANSCRIPT_WEAKNESSES),
        suggestions: owned(pools::TRANSCRIPT_SUGGESTIONS),
        ats_result,
        answers,
    }
}

/// Builds the report for a finished coding round.
pub fn synthesize_coding_report(
    result: &CodingResult,
    ats_result: Option<AtsResult>,
) -> InterviewReport {
    let score = result.score;

    let strengths = if score >= CODING_STRENGTH_THRESHOLD {
        owned(pools::CODING_STRENGTHS_HIGH)
    } else {
        owned(pools::CODING_STRENGTHS_LOW)
    };
    let weaknesses = if score < 100 {
        owned(pools::CODING_WEAKNESSES)
    } else {
        Vec::new()
    };

    let answers = result
        .answers
        .iter()
        .map(|a| QaPair {
            question: result.question_title(a.question_id).to_string(),
            answer: a.code.clone(),
        })
        .collect();

    InterviewReport {
        technical_score: score,
        communication_score: 0,
        problem_solving_score: score,
        confidence_score: (score as f64 * 0.9).round() as u32,
        overall_score: score,
        strengths,
        weaknesses,
        suggestions: owned(pools::CODING_SUGGESTIONS),
        ats_result,
        answers,
    }
}

/// Fixed report emitted when the candidate ends a session early.
pub fn partial_report(ats_result: Option<AtsResult>) -> InterviewReport {
    InterviewReport {
        technical_score: PARTIAL_SCORE,
        communication_score: PARTIAL_SCORE,
        problem_solving_score: PARTIAL_SCORE,
        confidence_score: PARTIAL_SCORE,
        overall_score: PARTIAL_SCORE,
        strengths: owned(pools::EARLY_EXIT_STRENGTHS),
        weaknesses: owned(pools::EARLY_EXIT_WEAKNESSES),
        suggestions: owned(pools::EARLY_EXIT_SUGGESTIONS),
        ats_result,
        answers: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coding::CodingAnswer;
    use crate::coding::questions::default_questions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair(answer: &str) -> QaPair {
        QaPair {
            question: "Tell me about a project.".to_string(),
            answer: answer.to_string(),
        }
    }

    fn padded(prefix: &str, len: usize) -> String {
        let mut s = prefix.to_string();
        while s.chars().count() < len {
            s.push('.');
        }
        s
    }

    #[test]
    fn test_scenario_single_pair_with_two_keywords() {
        let answer = padded("I implemented an algorithm", 120);
        assert_eq!(answer.chars().count(), 120);
        let transcript = vec![
            Message::interviewer("Describe your last project."),
            Message::candidate(answer),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let report = synthesize_transcript_report(&transcript, None, &mut rng);

        assert_eq!(report.technical_score, 74);
        assert_eq!(report.communication_score, 77);
        assert_eq!(report.overall_score, 75);
        assert_eq!(report.answers.len(), 1);
    }

    #[test]
    fn test_qa_pairs_skip_trailing_interviewer_message() {
        let transcript = vec![
            Message::interviewer("Q1"),
            Message::candidate("A1"),
            Message::interviewer("Q2"),
            Message::candidate("A2"),
            Message::interviewer("Thanks, the interview is now complete."),
        ];
        let pairs = extract_qa_pairs(&transcript);
        assert_eq!(
            pairs,
            vec![
                QaPair {
                    question: "Q1".to_string(),
                    answer: "A1".to_string()
                },
                QaPair {
                    question: "Q2".to_string(),
                    answer: "A2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_qa_pairs_require_adjacency() {
        // Two candidate messages in a row: only the first is paired.
        let transcript = vec![
            Message::candidate("hello?"),
            Message::interviewer("Q1"),
            Message::candidate("A1"),
            Message::candidate("A1 continued"),
        ];
        let pairs = extract_qa_pairs(&transcript);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].answer, "A1");
    }

    #[test]
    fn test_empty_transcript_scores_baseline() {
        let mut rng = StdRng::seed_from_u64(3);
        let report = synthesize_transcript_report(&[], None, &mut rng);
        assert_eq!(report.technical_score, 70);
        assert_eq!(report.communication_score, 65);
        // (70 + 65 + 75) / 3 = 70
        assert_eq!(report.overall_score, 70);
        assert!(report.answers.is_empty());
    }

    #[test]
    fn test_technical_score_monotonic_and_saturates() {
        let mut previous = 0;
        for hits in 0..40 {
            let score = technical_score(hits);
            assert!(score >= previous, "hits={hits}");
            assert!(score <= 95);
            previous = score;
        }
        assert_eq!(technical_score(12), 94);
        assert_eq!(technical_score(13), 95);
        assert_eq!(technical_score(u32::MAX), 95);
    }

    #[test]
    fn test_communication_score_monotonic_and_saturates() {
        let mut previous = 0.0;
        for len in (0..1000).step_by(7) {
            let score = communication_score(len as f64);
            assert!(score >= previous, "len={len}");
            assert!(score <= 95.0);
            previous = score;
        }
        assert_eq!(communication_score(300.0), 95.0);
        assert_eq!(communication_score(5000.0), 95.0);
    }

    #[test]
    fn test_keyword_hits_count_once_per_answer() {
        let pairs = vec![
            pair("API api Api, and a database"),
            pair("I designed and built the system"),
        ];
        // answer 1: api, database → 2; answer 2: designed, built, system → 3
        assert_eq!(keyword_hits(&pairs), 5);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        assert_eq!(keyword_hits(&[pair("RAPID prototyping")]), 1); // "api" inside "rapid"
        assert_eq!(keyword_hits(&[pair("Nothing relevant here")]), 0);
    }

    #[test]
    fn test_random_scores_stay_in_range() {
        let transcript = vec![Message::interviewer("Q"), Message::candidate("A")];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let report = synthesize_transcript_report(&transcript, None, &mut rng);
            assert!((75..=89).contains(&report.problem_solving_score));
            assert!((72..=86).contains(&report.confidence_score));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let transcript = vec![Message::interviewer("Q"), Message::candidate("A")];
        let a = synthesize_transcript_report(&transcript, None, &mut StdRng::seed_from_u64(9));
        let b = synthesize_transcript_report(&transcript, None, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.problem_solving_score, b.problem_solving_score);
        assert_eq!(a.confidence_score, b.confidence_score);
    }

    #[test]
    fn test_transcript_report_carries_ats_result() {
        let ats = AtsResult::fallback();
        let mut rng = StdRng::seed_from_u64(0);
        let report = synthesize_transcript_report(&[], Some(ats.clone()), &mut rng);
        assert_eq!(report.ats_result, Some(ats));
    }

    fn coding_result(submitted: &[bool]) -> CodingResult {
        let questions = default_questions();
        let answers = questions
            .iter()
            .zip(submitted)
            .map(|(q, &passed)| CodingAnswer {
                question_id: q.id,
                code: q.starter_code.clone(),
                passed,
            })
            .collect::<Vec<_>>();
        let done = submitted.iter().filter(|s| **s).count();
        CodingResult {
            score: ((done as f64 / questions.len() as f64) * 100.0).round() as u32,
            questions,
            answers,
        }
    }

    #[test]
    fn test_coding_report_two_of_three() {
        let report = synthesize_coding_report(&coding_result(&[true, true, false]), None);
        assert_eq!(report.overall_score, 67);
        assert_eq!(report.technical_score, 67);
        assert_eq!(report.problem_solving_score, 67);
        assert_eq!(report.communication_score, 0);
        assert_eq!(report.confidence_score, 60); // round(60.3)
        assert_eq!(report.strengths, owned(pools::CODING_STRENGTHS_LOW));
        assert_eq!(report.weaknesses, owned(pools::CODING_WEAKNESSES));
        assert_eq!(report.answers[0].question, "Two Sum");
    }

    #[test]
    fn test_coding_report_perfect_has_no_weaknesses() {
        let report = synthesize_coding_report(&coding_result(&[true, true, true]), None);
        assert_eq!(report.overall_score, 100);
        assert_eq!(report.confidence_score, 90);
        assert!(report.weaknesses.is_empty());
        assert_eq!(report.strengths, owned(pools::CODING_STRENGTHS_HIGH));
    }

    #[test]
    fn test_partial_report_is_all_fifties() {
        let report = partial_report(Some(AtsResult::fallback()));
        assert_eq!(report.overall_score, 50);
        assert_eq!(report.technical_score, 50);
        assert_eq!(report.communication_score, 50);
        assert_eq!(report.problem_solving_score, 50);
        assert_eq!(report.confidence_score, 50);
        assert!(report.answers.is_empty());
        assert_eq!(report.weaknesses, vec!["Interview ended early".to_string()]);
        assert!(report.ats_result.is_some());
    }
}

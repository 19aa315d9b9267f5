use serde::Serialize;
use thiserror::Error;

use crate::coding::questions::{default_questions, QuestionOrigin};
use crate::models::coding::{CodingAnswer, CodingQuestion, CodingResult};

#[derive(Debug, Error, PartialEq)]
pub enum RoundError {
    #[error("problem index {index} out of range (round has {total} problems)")]
    OutOfRange { index: usize, total: usize },

    #[error("coding round is already finished")]
    Finished,
}

/// Result of submitting the current problem.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitOutcome {
    pub submitted_index: usize,
    pub title: String,
    /// Where the cursor moved, if any unsubmitted problem remains.
    pub advanced_to: Option<usize>,
}

/// Per-problem view used in round snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemStatus {
    pub index: usize,
    pub question_id: u32,
    pub title: String,
    pub submitted: bool,
}

/// State of one coding round. Problems are fixed once the round starts.
#[derive(Debug, Clone)]
pub struct CodingRound {
    questions: Vec<CodingQuestion>,
    origin: QuestionOrigin,
    drafts: Vec<String>,
    submitted: Vec<bool>,
    current: usize,
    finished: bool,
}

impl CodingRound {
    /// Starts a round. An empty problem set is replaced by the built-in one.
    pub fn new(questions: Vec<CodingQuestion>, origin: QuestionOrigin) -> Self {
        let (questions, origin) = if questions.is_empty() {
            (default_questions(), QuestionOrigin::BuiltIn)
        } else {
            (questions, origin)
        };
        let drafts = questions.iter().map(|q| q.starter_code.clone()).collect();
        let submitted = vec![false; questions.len()];
        Self {
            questions,
            origin,
            drafts,
            submitted,
            current: 0,
            finished: false,
        }
    }

    pub fn questions(&self) -> &[CodingQuestion] {
        &self.questions
    }

    pub fn origin(&self) -> QuestionOrigin {
        self.origin
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &CodingQuestion {
        &self.questions[self.current]
    }

    pub fn current_draft(&self) -> &str {
        &self.drafts[self.current]
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted.iter().filter(|s| **s).count()
    }

    pub fn statuses(&self) -> Vec<ProblemStatus> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, q)| ProblemStatus {
                index,
                question_id: q.id,
                title: q.title.clone(),
                submitted: self.submitted[index],
            })
            .collect()
    }

    /// Free-form navigation, independent of submission state.
    pub fn select(&mut self, index: usize) -> Result<(), RoundError> {
        self.ensure_open()?;
        if index >= self.questions.len() {
            return Err(RoundError::OutOfRange {
                index,
                total: self.questions.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn update_draft(&mut self, code: String) -> Result<(), RoundError> {
        self.ensure_open()?;
        self.drafts[self.current] = code;
        Ok(())
    }

    /// Marks the current problem submitted and moves to the next unsubmitted
    /// one, searching forward and then wrapping to the start.
    pub fn submit_current(&mut self) -> Result<SubmitOutcome, RoundError> {
        self.ensure_open()?;
        let submitted_index = self.current;
        self.submitted[submitted_index] = true;

        let total = self.questions.len();
        let advanced_to = (1..total)
            .map(|offset| (submitted_index + offset) % total)
            .find(|&i| !self.submitted[i]);
        if let Some(next) = advanced_to {
            self.current = next;
        }

        Ok(SubmitOutcome {
            submitted_index,
            title: self.questions[submitted_index].title.clone(),
            advanced_to,
        })
    }

    /// round(100 × submitted / total)
    pub fn score(&self) -> u32 {
        completion_score(self.submitted_count(), self.questions.len())
    }

    /// Closes the round and collects every problem's code and submitted flag.
    pub fn finish(&mut self) -> Result<CodingResult, RoundError> {
        self.ensure_open()?;
        self.finished = true;
        Ok(self.result())
    }

    pub fn close(&mut self) {
        self.finished = true;
    }

    fn result(&self) -> CodingResult {
        let answers = self
            .questions
            .iter()
            .zip(&self.drafts)
            .zip(&self.submitted)
            .map(|((q, code), &passed)| CodingAnswer {
                question_id: q.id,
                code: code.clone(),
                passed,
            })
            .collect();
        CodingResult {
            questions: self.questions.clone(),
            answers,
            score: self.score(),
        }
    }

    fn ensure_open(&self) -> Result<(), RoundError> {
        if self.finished {
            Err(RoundError::Finished)
        } else {
            Ok(())
        }
    }
}

pub fn completion_score(submitted: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((submitted as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> CodingRound {
        CodingRound::new(default_questions(), QuestionOrigin::BuiltIn)
    }

    #[test]
    fn test_drafts_seeded_with_starter_code() {
        let r = round();
        assert_eq!(r.current_draft(), default_questions()[0].starter_code);
        assert_eq!(r.current_index(), 0);
        assert_eq!(r.score(), 0);
    }

    #[test]
    fn test_empty_set_falls_back_to_builtin() {
        let r = CodingRound::new(vec![], QuestionOrigin::Generated);
        assert_eq!(r.questions().len(), 3);
        assert_eq!(r.origin(), QuestionOrigin::BuiltIn);
    }

    #[test]
    fn test_two_of_three_scores_67() {
        let mut r = round();
        r.submit_current().unwrap();
        r.submit_current().unwrap();
        assert_eq!(r.submitted_count(), 2);
        assert_eq!(r.score(), 67);
    }

    #[test]
    fn test_completion_score_for_every_subset() {
        for total in 1..=7usize {
            for submitted in 0..=total {
                let expected = ((200 * submitted + total) / (2 * total)) as u32;
                assert_eq!(completion_score(submitted, total), expected);
            }
            assert_eq!(completion_score(0, total), 0);
            assert_eq!(completion_score(total, total), 100);
        }
    }

    #[test]
    fn test_submit_advances_to_next_unsubmitted_with_wrap() {
        let mut r = round();
        r.select(2).unwrap();
        let outcome = r.submit_current().unwrap();
        assert_eq!(outcome.submitted_index, 2);
        assert_eq!(outcome.advanced_to, Some(0));
        assert_eq!(outcome.title, "Reverse Linked List");

        // forward from 0 the next open problem is 1
        let outcome = r.submit_current().unwrap();
        assert_eq!(outcome.advanced_to, Some(1));

        let outcome = r.submit_current().unwrap();
        assert_eq!(outcome.advanced_to, None);
        assert_eq!(r.current_index(), 1);
        assert_eq!(r.score(), 100);
    }

    #[test]
    fn test_resubmitting_is_idempotent_for_score() {
        let mut r = round();
        r.submit_current().unwrap();
        r.select(0).unwrap();
        r.submit_current().unwrap();
        assert_eq!(r.submitted_count(), 1);
        assert_eq!(r.score(), 33);
    }

    #[test]
    fn test_navigation_is_free_form_and_bounded() {
        let mut r = round();
        r.select(2).unwrap();
        r.select(0).unwrap();
        assert_eq!(
            r.select(3),
            Err(RoundError::OutOfRange { index: 3, total: 3 })
        );
        assert_eq!(r.current_index(), 0);
    }

    #[test]
    fn test_drafts_are_per_problem() {
        let mut r = round();
        r.update_draft("function twoSum() { return [0, 1]; }".to_string())
            .unwrap();
        r.select(1).unwrap();
        assert!(r.current_draft().contains("isValid"));
        r.select(0).unwrap();
        assert!(r.current_draft().contains("return [0, 1]"));
    }

    #[test]
    fn test_finish_collects_answers_and_closes() {
        let mut r = round();
        r.update_draft("solved".to_string()).unwrap();
        r.submit_current().unwrap();
        let result = r.finish().unwrap();

        assert_eq!(result.score, 33);
        assert_eq!(result.answers.len(), 3);
        assert_eq!(result.answers[0].code, "solved");
        assert!(result.answers[0].passed);
        assert!(!result.answers[1].passed);
        assert_eq!(result.answers[1].code, default_questions()[1].starter_code);

        assert_eq!(r.finish().unwrap_err(), RoundError::Finished);
        assert_eq!(r.submit_current().unwrap_err(), RoundError::Finished);
    }
}

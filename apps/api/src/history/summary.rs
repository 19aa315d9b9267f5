use serde::Serialize;

use crate::models::history::HistoryEntry;

/// Overall score at or above which a session counts as a high score.
pub const HIGH_SCORE_THRESHOLD: u32 = 80;

/// Aggregates shown above the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    pub total_interviews: usize,
    pub average_score: u32,
    pub best_score: u32,
    pub high_scores: usize,
}

pub fn summarize(entries: &[HistoryEntry]) -> HistorySummary {
    if entries.is_empty() {
        return HistorySummary {
            total_interviews: 0,
            average_score: 0,
            best_score: 0,
            high_scores: 0,
        };
    }

    let total: u64 = entries.iter().map(|e| u64::from(e.overall_score)).sum();
    let average = (total as f64 / entries.len() as f64).round() as u32;

    HistorySummary {
        total_interviews: entries.len(),
        average_score: average,
        best_score: entries.iter().map(|e| e.overall_score).max().unwrap_or(0),
        high_scores: entries
            .iter()
            .filter(|e| e.overall_score >= HIGH_SCORE_THRESHOLD)
            .count(),
    }
}

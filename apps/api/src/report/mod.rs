// Report Synthesizer: turns a finished transcript or coding result into an
// InterviewReport. Scores are fixed heuristics over the transcript or round.

pub mod pools;
pub mod synthesizer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::interview::InterviewType;

/// Summary of one completed session, as persisted in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub interview_type: InterviewType,
    pub role: String,
    pub overall_score: u32,
    pub technical_score: u32,
    pub communication_score: u32,
}

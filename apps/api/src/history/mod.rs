//! Append-only log of completed sessions, persisted as one JSON array
//! under a single key of the local store.

pub mod handlers;
pub mod store;
pub mod summary;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::history::HistoryEntry;
use crate::models::interview::InterviewConfig;
use crate::models::report::InterviewReport;

use store::{KeyValueStore, StoreError};

pub const HISTORY_KEY: &str = "interview_history";

#[derive(Clone)]
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
    // read-modify-write of the whole array must not interleave
    write_lock: Arc<Mutex<()>>,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All entries, oldest first. A missing key is an empty log; an
    /// unreadable one is an error and is never overwritten.
    pub async fn read(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        match self.store.get(HISTORY_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                key: HISTORY_KEY.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Appends one entry and returns the new log length.
    pub async fn append(&self, entry: HistoryEntry) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read().await?;
        entries.push(entry);
        let raw = serde_json::to_string(&entries).map_err(|e| StoreError::Corrupt {
            key: HISTORY_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(HISTORY_KEY, raw).await?;
        info!("History log now holds {} sessions", entries.len());
        Ok(entries.len())
    }
}

/// Builds the log entry for a finished session.
pub fn entry_for(config: &InterviewConfig, report: &InterviewReport) -> HistoryEntry {
    HistoryEntry {
        id: Uuid::new_v4(),
        date: Utc::now(),
        interview_type: config.interview_type,
        role: config.role.clone(),
        overall_score: report.overall_score,
        technical_score: report.technical_score,
        communication_score: report.communication_score,
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Storage(err.to_string())
    }
}

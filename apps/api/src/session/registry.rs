use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::controller::SessionController;

pub type SessionHandle = Arc<Mutex<SessionController>>;

/// Live sessions by id. A session stays readable until `prune` finds it
/// expired.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    pub async fn insert(&self, controller: SessionController) -> SessionHandle {
        let id = controller.id();
        let handle = Arc::new(Mutex::new(controller));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Drops expired sessions and returns how many were removed. Sessions
    /// busy in another task are skipped this round.
    pub async fn prune(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(ctl) => !ctl.is_expired(ttl),
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Evicted {removed} expired sessions, {} remain", sessions.len());
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

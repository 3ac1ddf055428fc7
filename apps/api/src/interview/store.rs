//! In-memory session registry. Sessions live for the lifetime of the process.
//!
//! Each session sits behind its own mutex so a slow model call on one interview
//! never blocks another. A mutating request that finds its session already
//! locked is rejected rather than queued: one user action per session at a time.
//! Reads wait for the running action to settle instead.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::session::InterviewSession;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<InterviewSession>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: InterviewSession) -> Uuid {
        let id = session.id;
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    async fn get(&self, id: Uuid) -> Result<Arc<Mutex<InterviewSession>>, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
    }

    /// Locks a session for one operation. Fails with `Conflict` if another
    /// operation on the same session is still in flight.
    pub async fn claim(&self, id: Uuid) -> Result<OwnedMutexGuard<InterviewSession>, AppError> {
        let session = self.get(id).await?;
        session.try_lock_owned().map_err(|_| {
            AppError::Conflict(format!(
                "Interview {id} is busy with another request; retry when it completes"
            ))
        })
    }

    /// Waits for any in-flight operation to finish, then locks the session.
    pub async fn read(&self, id: Uuid) -> Result<OwnedMutexGuard<InterviewSession>, AppError> {
        Ok(self.get(id).await?.lock_owned().await)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        // Hold the session lock while removing so an in-flight request finishes first.
        let _guard = self.claim(id).await?;
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

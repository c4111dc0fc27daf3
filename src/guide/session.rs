//! Session registry — independent wizard traversals for the HTTP host.
//!
//! Each session owns one `WizardState`. The lock only guards the map; every
//! wizard call runs to completion under the write guard, so a traversal never
//! observes a partial update.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::action::Action;
use super::quick_reference::SectionKey;
use super::screen::Screen;
use super::state::WizardState;
use crate::error::{Result, SessionError};

/// One live traversal.
#[derive(Debug, Clone)]
pub struct GuideSession {
    pub id: Uuid,
    pub state: WizardState,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl GuideSession {
    fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            state: self.state.clone(),
            screen: self.state.current_screen(),
        }
    }
}

/// What the HTTP host returns after every call: the state plus the screen
/// to paint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: WizardState,
    pub screen: Screen,
}

/// In-memory map of session id to traversal.
pub struct GuideSessions {
    sessions: RwLock<HashMap<Uuid, GuideSession>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl GuideSessions {
    pub fn new(max_sessions: usize, idle_timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            idle_timeout,
        })
    }

    /// Mount a new traversal for a viewer the access check has already judged.
    pub async fn open(&self, authorized: bool) -> Result<SessionView> {
        let state = WizardState::mount(authorized)?;

        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(SessionError::CapacityReached {
                max: self.max_sessions,
            }
            .into());
        }

        let now = Utc::now();
        let session = GuideSession {
            id: Uuid::new_v4(),
            state,
            created_at: now,
            last_active: now,
        };
        let view = session.view();
        sessions.insert(session.id, session);

        info!(session_id = %view.id, active = sessions.len(), "Guide session opened");
        Ok(view)
    }

    /// Current state and screen.
    pub async fn view(&self, id: Uuid) -> Result<SessionView> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(GuideSession::view)
            .ok_or_else(|| SessionError::NotFound { id }.into())
    }

    /// Dispatch an action to a traversal.
    pub async fn dispatch(&self, id: Uuid, action: Action) -> Result<SessionView> {
        self.with_session(id, |state| {
            state.dispatch(action)?;
            Ok(())
        })
        .await
    }

    /// Toggle a quick-reference panel.
    pub async fn toggle_section(&self, id: Uuid, key: SectionKey) -> Result<SessionView> {
        self.with_session(id, |state| {
            state.toggle_section(key);
            Ok(())
        })
        .await
    }

    /// Start a traversal over.
    pub async fn reset(&self, id: Uuid) -> Result<SessionView> {
        self.with_session(id, |state| {
            state.reset();
            Ok(())
        })
        .await
    }

    /// Unmount a traversal.
    pub async fn close(&self, id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.remove(&id) {
            Some(session) => {
                let lifetime_secs = (Utc::now() - session.created_at).num_seconds();
                info!(session_id = %id, lifetime_secs, "Guide session closed");
                Ok(())
            }
            None => Err(SessionError::NotFound { id }.into()),
        }
    }

    /// Drop sessions idle longer than the timeout. Returns how many went.
    pub async fn expire_idle(&self) -> usize {
        let cutoff = match chrono::Duration::from_std(self.idle_timeout) {
            Ok(timeout) => Utc::now() - timeout,
            Err(_) => return 0,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active > cutoff);
        let expired = before - sessions.len();

        if expired > 0 {
            info!(expired, remaining = sessions.len(), "Expired idle guide sessions");
        }
        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn with_session<F>(&self, id: Uuid, f: F) -> Result<SessionView>
    where
        F: FnOnce(&mut WizardState) -> Result<()>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound { id })?;

        // Work on a copy so a failed call never leaves a half-applied state.
        let mut next = session.state.clone();
        f(&mut next)?;
        session.state = next;
        session.last_active = Utc::now();

        debug!(session_id = %id, step = %session.state.current_step, "Guide session updated");
        Ok(session.view())
    }
}

/// Spawn a background task that drops idle sessions on a fixed interval.
pub fn spawn_idle_sweep(
    sessions: Arc<GuideSessions>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            sessions.expire_idle().await;
        }
    })
}

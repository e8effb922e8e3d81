//! Moka-backed session store
//!
//! Keeps each visitor's [`SessionState`] in memory. An entry expires once it
//! has gone a full idle window without a write; reading a session does not
//! keep it alive.

use std::time::{Duration, Instant};

use application::{error::ApplicationError, ports::SessionStorePort};
use async_trait::async_trait;
use domain::{SessionId, SessionState, SessionUpdate};
use moka::{
    Expiry,
    future::Cache,
    ops::compute::{CompResult, Op},
};
use tracing::{debug, instrument};

use crate::config::SessionConfig;

/// Per-entry expiry: the window restarts on every write
#[derive(Debug, Clone, Copy)]
struct IdleSinceWrite(Duration);

impl Expiry<SessionId, SessionState> for IdleSinceWrite {
    fn expire_after_create(
        &self,
        _key: &SessionId,
        _value: &SessionState,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(self.0)
    }

    fn expire_after_update(
        &self,
        _key: &SessionId,
        _value: &SessionState,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(self.0)
    }
}

/// In-memory session store with a sliding idle window
pub struct MokaSessionStore {
    cache: Cache<SessionId, SessionState>,
    idle_timeout: Duration,
}

impl std::fmt::Debug for MokaSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSessionStore")
            .field("sessions", &self.cache.entry_count())
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

impl MokaSessionStore {
    /// Create a store forgetting sessions after `idle_timeout` without a write
    #[must_use]
    pub fn new(idle_timeout: Duration, max_sessions: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .expire_after(IdleSinceWrite(idle_timeout))
            .build();

        Self {
            cache,
            idle_timeout,
        }
    }

    /// Create a store from the session configuration
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.idle_timeout(), config.max_sessions)
    }

    /// Idle window after which a session is forgotten
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }
}

impl Default for MokaSessionStore {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[async_trait]
impl SessionStorePort for MokaSessionStore {
    #[instrument(skip(self), level = "debug")]
    async fn get(&self, id: &SessionId) -> Result<SessionState, ApplicationError> {
        let state = self
            .cache
            .get_with(*id, async {
                debug!("Starting new session");
                SessionState::default()
            })
            .await;
        Ok(state)
    }

    #[instrument(skip(self, update), level = "debug")]
    async fn merge(
        &self,
        id: &SessionId,
        update: SessionUpdate,
    ) -> Result<SessionState, ApplicationError> {
        let result = self
            .cache
            .entry(*id)
            .and_compute_with(|current| {
                let mut state = current.map(|e| e.into_value()).unwrap_or_default();
                state.apply(update);
                std::future::ready(Op::Put(state))
            })
            .await;

        match result {
            CompResult::Inserted(entry) | CompResult::ReplacedWith(entry) => {
                debug!("Session updated");
                Ok(entry.into_value())
            },
            _ => Err(ApplicationError::Internal(
                "Session write was not applied".to_string(),
            )),
        }
    }
}

//! Visitor session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session cookie and store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Seconds without a write after which a session is forgotten
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Upper bound on live sessions kept in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,

    /// Mark the cookie `Secure` (only sent over HTTPS)
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_cookie_name() -> String {
    "skycast.sid".to_string()
}

const fn default_idle_timeout() -> u64 {
    600
}

const fn default_max_sessions() -> u64 {
    10_000
}

impl SessionConfig {
    /// Idle window as a `Duration`
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            idle_timeout_secs: default_idle_timeout(),
            max_sessions: default_max_sessions(),
            secure_cookie: false,
        }
    }
}

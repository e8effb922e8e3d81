//! Session store port
//!
//! Per-visitor state keyed by the opaque session identifier.

use async_trait::async_trait;
use domain::{SessionId, SessionState, SessionUpdate};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the visitor session store
///
/// Implementations expire a session after a fixed idle period; an expired
/// session is indistinguishable from one that never existed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Current state for a visitor, creating an empty one if absent
    async fn get(&self, id: &SessionId) -> Result<SessionState, ApplicationError>;

    /// Overwrite the fields carried by `update` (last write wins)
    ///
    /// Returns the state after the merge.
    async fn merge(
        &self,
        id: &SessionId,
        update: SessionUpdate,
    ) -> Result<SessionState, ApplicationError>;
}

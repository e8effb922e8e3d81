//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A required query parameter was absent or empty
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// The geocoder had no match for the searched name
    #[error("Not found: {0}")]
    NotFound(String),

    /// External service error (network, HTTP status, malformed payload)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is an expected lookup outcome
    ///
    /// Lookup failures are turned into a user-facing notice on the page;
    /// everything else is a fault of the server itself.
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::MissingInput(_) | Self::NotFound(_) | Self::ExternalService(_)
        )
    }
}

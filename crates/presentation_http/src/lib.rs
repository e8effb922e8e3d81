//! Skycast HTTP presentation layer
//!
//! Server-rendered weather pages, the session cookie middleware and a
//! liveness endpoint.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiError;
pub use middleware::{SessionLayer, SessionSettings};
pub use routes::create_router;
pub use state::AppState;

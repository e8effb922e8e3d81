//! Application layer - Use cases and orchestration
//!
//! Contains the weather lookup flows, the render context they produce and the
//! port definitions for the weather provider and the session store.
//! Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod render_context;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use render_context::RenderContext;
pub use services::*;

//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the Open-Meteo weather adapter, the in-memory session store,
//! configuration loading and the page template engine.

pub mod adapters;
pub mod config;
pub mod session;
pub mod templates;

pub use adapters::*;
pub use config::{AppConfig, InvalidPort, ServerConfig, SessionConfig, port_from_env};
pub use session::MokaSessionStore;
pub use templates::{TemplateConfig, TemplateEngine, TemplateError};

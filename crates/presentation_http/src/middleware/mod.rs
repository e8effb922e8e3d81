//! HTTP middleware components

pub mod session;

pub use session::{SessionLayer, SessionService, SessionSettings};

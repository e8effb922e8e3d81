//! Visitor session storage

mod moka_session_store;

pub use moka_session_store::MokaSessionStore;

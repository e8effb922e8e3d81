//! Application services
//!
//! Use-case orchestration on top of the ports.

mod lookup_service;

pub use lookup_service::{CURRENT_LOCATION_LABEL, LookupFlow, LookupService};

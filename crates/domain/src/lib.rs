//! Domain layer for Skycast
//!
//! Contains the weather lookup vocabulary: coordinates, geocoding matches,
//! daily forecast series and the per-visitor session record.
//! This layer has no I/O and no knowledge of HTTP or the weather provider.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

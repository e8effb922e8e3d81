//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod geo_result;
mod session_id;

pub use geo_location::GeoLocation;
pub use geo_result::GeoResult;
pub use session_id::SessionId;

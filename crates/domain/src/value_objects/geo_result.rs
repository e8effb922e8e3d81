//! Result of a name-based geocoding lookup

use serde::{Deserialize, Serialize};

use super::GeoLocation;

/// First geocoding match for a searched place name
///
/// Transient: produced per request and never stored in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    /// Resolved coordinates
    pub location: GeoLocation,
    /// Canonical place name as reported by the geocoder
    pub name: String,
}

impl GeoResult {
    /// Create a new geocoding result
    pub fn new(location: GeoLocation, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
        }
    }
}

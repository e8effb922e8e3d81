//! Weather service port
//!
//! Defines the interface for geocoding and daily weather retrieval.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{DailyForecast, GeoLocation, GeoResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather provider operations
///
/// Each call is a single request against the provider: no retries, and a
/// failure is returned to the caller as is.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Resolve a place name to coordinates (first match only)
    ///
    /// Returns `ApplicationError::NotFound` when the geocoder has no match.
    async fn geocode(&self, name: &str) -> Result<GeoResult, ApplicationError>;

    /// Multi-day forecast for a location
    async fn forecast(&self, location: &GeoLocation) -> Result<DailyForecast, ApplicationError>;

    /// Observed weather for a single past day
    async fn archive(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
    ) -> Result<DailyForecast, ApplicationError>;
}

//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo geocoding, forecast and archive APIs.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{DailyResponse, DailySeries, GeocodingResponse, Place};

/// Daily variables requested from the forecast and archive endpoints
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The geocoder returned no match
    #[error("Location not found: {0}")]
    LocationNotFound(String),
}

/// Weather service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Geocoding API base URL (default: <https://geocoding-api.open-meteo.com/v1>)
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,

    /// Forecast API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,

    /// Historical archive API base URL (default: <https://archive-api.open-meteo.com/v1>)
    #[serde(default = "default_archive_base_url")]
    pub archive_base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days (1-16, default: 7)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Language for geocoding results (default: "en")
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_archive_base_url() -> String {
    "https://archive-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_forecast_days() -> u8 {
    7
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            archive_base_url: default_archive_base_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
            language: default_language(),
        }
    }
}

/// Weather client trait for geocoding and daily weather lookups
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Resolve a place name to its first geocoding match
    async fn geocode(&self, name: &str) -> Result<Place, WeatherError>;

    /// Daily forecast starting today at the given coordinates
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<DailySeries, WeatherError>;

    /// Observed weather for a single past day at the given coordinates
    async fn daily_archive(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<DailySeries, WeatherError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn forecast_request(&self, latitude: f64, longitude: f64) -> RequestBuilder {
        let days = self.config.forecast_days.clamp(1, 16);
        self.client
            .get(format!("{}/forecast", self.config.forecast_base_url))
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("forecast_days", days.to_string()),
            ])
    }

    fn archive_request(&self, latitude: f64, longitude: f64, date: NaiveDate) -> RequestBuilder {
        let day = date.format("%Y-%m-%d").to_string();
        self.client
            .get(format!("{}/archive", self.config.archive_base_url))
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
    }

    /// Send a request and decode the JSON body, mapping HTTP failures
    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, WeatherError> {
        let response = request
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    async fn fetch_daily(request: RequestBuilder) -> Result<DailySeries, WeatherError> {
        let response: DailyResponse = Self::fetch(request).await?;
        let daily = response.daily.ok_or_else(|| {
            WeatherError::ParseError("No daily data in response".to_string())
        })?;
        DailySeries::try_from(daily)
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, name: &str) -> Result<Place, WeatherError> {
        let request = self
            .client
            .get(format!("{}/search", self.config.geocoding_base_url))
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", self.config.language.as_str()),
                ("format", "json"),
            ]);
        debug!("Geocoding place name");

        let response: GeocodingResponse = Self::fetch(request).await?;

        response
            .results
            .and_then(|results| results.into_iter().next())
            .map(Place::from)
            .ok_or_else(|| WeatherError::LocationNotFound(name.to_string()))
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<DailySeries, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        debug!(days = self.config.forecast_days, "Fetching daily forecast");
        Self::fetch_daily(self.forecast_request(latitude, longitude)).await
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, %date))]
    async fn daily_archive(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<DailySeries, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        debug!("Fetching archived daily weather");
        Self::fetch_daily(self.archive_request(latitude, longitude, date)).await
    }
}

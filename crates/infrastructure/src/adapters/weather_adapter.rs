//! Weather adapter - Implements WeatherPort using integration_weather

use application::{error::ApplicationError, ports::WeatherPort};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{DailyForecast, GeoLocation, GeoResult};
use integration_weather::{
    DailySeries, OpenMeteoClient, Place, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather services using Open-Meteo API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"WeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing weather client
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::LocationNotFound(name) => ApplicationError::NotFound(name),
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }

    fn map_place(place: Place) -> Result<GeoResult, ApplicationError> {
        let location = GeoLocation::new(place.latitude, place.longitude).map_err(|e| {
            ApplicationError::ExternalService(format!("Geocoder returned {e} for {}", place.name))
        })?;
        Ok(GeoResult::new(location, place.name))
    }

    fn map_series(series: DailySeries) -> Result<DailyForecast, ApplicationError> {
        DailyForecast::new(
            series.dates,
            series.weather_codes,
            series.temperature_max,
            series.temperature_min,
        )
        .map_err(|e| ApplicationError::ExternalService(e.to_string()))
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, name: &str) -> Result<GeoResult, ApplicationError> {
        let place = self.client.geocode(name).await.map_err(|e| {
            debug!(error = %e, "Geocoding failed");
            Self::map_error(e)
        })?;

        debug!(resolved = %place.name, "Geocoded place");
        Self::map_place(place)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn forecast(&self, location: &GeoLocation) -> Result<DailyForecast, ApplicationError> {
        let series = self
            .client
            .daily_forecast(location.latitude(), location.longitude())
            .await
            .map_err(|e| {
                debug!(error = %e, "Failed to get forecast");
                Self::map_error(e)
            })?;

        debug!(days = series.dates.len(), "Retrieved forecast");
        Self::map_series(series)
    }

    #[instrument(skip(self), fields(location = %location, %date))]
    async fn archive(
        &self,
        location: &GeoLocation,
        date: NaiveDate,
    ) -> Result<DailyForecast, ApplicationError> {
        let series = self
            .client
            .daily_archive(location.latitude(), location.longitude(), date)
            .await
            .map_err(|e| {
                debug!(error = %e, "Failed to get archived weather");
                Self::map_error(e)
            })?;

        debug!(days = series.dates.len(), "Retrieved archived weather");
        Self::map_series(series)
    }
}

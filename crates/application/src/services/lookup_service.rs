//! Weather lookup service
//!
//! One method per page route. Each reads the visitor's session, performs at
//! most two provider calls, writes successful results back to the session and
//! returns the context to render. Expected failures (missing input, unknown
//! place, provider errors) become a notice on the page and never touch the
//! session.

use std::sync::Arc;

use chrono::NaiveDate;
use domain::{GeoLocation, SessionId, SessionState, SessionUpdate};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{SessionStorePort, WeatherPort},
    render_context::RenderContext,
};

/// City label stored for geolocation lookups
pub const CURRENT_LOCATION_LABEL: &str = "📍 Current Location";

/// The lookup a request performs, used to pick the notice for a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFlow {
    /// Search by city name
    City,
    /// Search by browser geolocation
    Location,
    /// Historical lookup for a city and date
    History,
}

impl LookupFlow {
    /// User-facing notice for a failed lookup
    #[must_use]
    pub const fn notice(self, error: &ApplicationError) -> &'static str {
        match (self, error) {
            (Self::City, ApplicationError::MissingInput(_)) => "Please enter a city",
            (Self::City | Self::History, ApplicationError::NotFound(_)) => "City not found",
            (Self::City, _) => "Failed to fetch weather data",
            (Self::Location, ApplicationError::MissingInput(_)) => "Please allow location access",
            (Self::Location, _) => "Failed to fetch location weather",
            (Self::History, ApplicationError::MissingInput(_)) => "Please enter a city and date",
            (Self::History, _) => "Failed to fetch historical weather",
        }
    }
}

/// Orchestrates provider calls and session updates for the page routes
pub struct LookupService {
    weather: Arc<dyn WeatherPort>,
    sessions: Arc<dyn SessionStorePort>,
}

impl std::fmt::Debug for LookupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupService").finish_non_exhaustive()
    }
}

impl LookupService {
    /// Create a new lookup service
    pub fn new(weather: Arc<dyn WeatherPort>, sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { weather, sessions }
    }

    /// Render the session as is, without any provider call
    #[instrument(skip(self, session), fields(session = %session))]
    pub async fn home(&self, session: &SessionId) -> Result<RenderContext, ApplicationError> {
        let state = self.sessions.get(session).await?;
        Ok(RenderContext::from_session(&state))
    }

    /// Geocode a city name and fetch its forecast
    #[instrument(skip(self, session), fields(session = %session))]
    pub async fn search_by_city(
        &self,
        session: &SessionId,
        city: Option<&str>,
    ) -> Result<RenderContext, ApplicationError> {
        let outcome = self.lookup_city(session, city).await;
        self.conclude(session, LookupFlow::City, outcome).await
    }

    /// Fetch the forecast for coordinates reported by the browser
    #[instrument(skip(self, session), fields(session = %session))]
    pub async fn search_by_location(
        &self,
        session: &SessionId,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<RenderContext, ApplicationError> {
        let outcome = self.lookup_location(session, latitude, longitude).await;
        self.conclude(session, LookupFlow::Location, outcome).await
    }

    /// Geocode a city name and fetch the observed weather for one past day
    #[instrument(skip(self, session), fields(session = %session))]
    pub async fn historical_lookup(
        &self,
        session: &SessionId,
        city: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<RenderContext, ApplicationError> {
        let outcome = self.lookup_history(session, city, date).await;
        self.conclude(session, LookupFlow::History, outcome).await
    }

    async fn lookup_city(
        &self,
        session: &SessionId,
        city: Option<&str>,
    ) -> Result<SessionState, ApplicationError> {
        let city = required(city, "city")?;

        let place = self.weather.geocode(city).await?;
        let forecast = self.weather.forecast(&place.location).await?;

        info!(city = %place.name, days = forecast.len(), "Forecast retrieved");
        self.sessions
            .merge(session, SessionUpdate::forecast(forecast, place.name))
            .await
    }

    async fn lookup_location(
        &self,
        session: &SessionId,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<SessionState, ApplicationError> {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(ApplicationError::MissingInput("lat/lon".to_string()));
        };
        let location = GeoLocation::new(latitude, longitude)?;

        let forecast = self.weather.forecast(&location).await?;

        info!(%location, days = forecast.len(), "Location forecast retrieved");
        self.sessions
            .merge(
                session,
                SessionUpdate::forecast(forecast, CURRENT_LOCATION_LABEL),
            )
            .await
    }

    async fn lookup_history(
        &self,
        session: &SessionId,
        city: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<SessionState, ApplicationError> {
        let city = required(city, "city")?;
        let date = date.ok_or_else(|| ApplicationError::MissingInput("date".to_string()))?;

        let place = self.weather.geocode(city).await?;
        let history = self.weather.archive(&place.location, date).await?;

        info!(city = %place.name, %date, "Historical weather retrieved");
        self.sessions
            .merge(session, SessionUpdate::history(history))
            .await
    }

    /// Turn a lookup outcome into the context to render
    async fn conclude(
        &self,
        session: &SessionId,
        flow: LookupFlow,
        outcome: Result<SessionState, ApplicationError>,
    ) -> Result<RenderContext, ApplicationError> {
        let error = match outcome {
            Ok(state) => return Ok(RenderContext::from_session(&state)),
            Err(e) if e.is_lookup_failure() => e,
            Err(e) => return Err(e),
        };

        match error {
            ApplicationError::ExternalService(_) | ApplicationError::Domain(_) => {
                warn!(error = %error, ?flow, "Weather lookup failed");
            },
            _ => debug!(error = %error, ?flow, "Weather lookup not completed"),
        }

        let state = self.sessions.get(session).await?;
        let notice = flow.notice(&error);

        Ok(match flow {
            LookupFlow::History => RenderContext::with_history_notice(&state, notice),
            LookupFlow::City | LookupFlow::Location => RenderContext::with_message(&state, notice),
        })
    }
}

/// Trimmed, non-empty value of a required parameter
fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApplicationError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApplicationError::MissingInput(field.to_string()))
}

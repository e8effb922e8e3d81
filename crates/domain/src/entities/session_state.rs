//! Per-visitor session record

use serde::{Deserialize, Serialize};

use super::DailyForecast;

/// Everything remembered about a visitor between requests
///
/// `Default` is the state of a first-time visitor (or one whose session
/// expired).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Last successful forecast
    pub weather: Option<DailyForecast>,
    /// Display name of the place the forecast belongs to
    pub city: Option<String>,
    /// WMO codes of the last forecast, one per day
    pub codes: Vec<u8>,
    /// Last successful historical lookup
    pub history: Option<DailyForecast>,
}

impl SessionState {
    /// Apply a partial update, replacing only the fields it carries
    pub fn apply(&mut self, update: SessionUpdate) {
        let SessionUpdate {
            weather,
            city,
            codes,
            history,
        } = update;

        if let Some(weather) = weather {
            self.weather = Some(weather);
        }
        if let Some(city) = city {
            self.city = Some(city);
        }
        if let Some(codes) = codes {
            self.codes = codes;
        }
        if let Some(history) = history {
            self.history = Some(history);
        }
    }
}

/// Partial session write
///
/// `None` means "leave as is". A present `DailyForecast` replaces the stored
/// one wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    pub weather: Option<DailyForecast>,
    pub city: Option<String>,
    pub codes: Option<Vec<u8>>,
    pub history: Option<DailyForecast>,
}

impl SessionUpdate {
    /// Update recording a fresh forecast for a place
    ///
    /// The code list is derived from the forecast itself.
    #[must_use]
    pub fn forecast(weather: DailyForecast, city: impl Into<String>) -> Self {
        let codes = weather.weather_codes().to_vec();
        Self {
            weather: Some(weather),
            city: Some(city.into()),
            codes: Some(codes),
            history: None,
        }
    }

    /// Update recording a historical lookup only
    #[must_use]
    pub fn history(history: DailyForecast) -> Self {
        Self {
            history: Some(history),
            ..Self::default()
        }
    }
}

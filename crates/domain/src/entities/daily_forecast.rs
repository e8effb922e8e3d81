//! Daily forecast series
//!
//! Four index-aligned sequences (date, WMO weather code, max and min
//! temperature) as returned by both the forecast and the archive lookups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Day-by-day weather series
///
/// All four sequences always have the same length; the only ways to build
/// one (`new` and deserialization) check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDailyForecast")]
pub struct DailyForecast {
    dates: Vec<NaiveDate>,
    weather_codes: Vec<u8>,
    temperature_max: Vec<f64>,
    temperature_min: Vec<f64>,
}

/// One aligned row of a [`DailyForecast`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyEntry {
    /// Calendar date (provider-local)
    pub date: NaiveDate,
    /// WMO weather code
    pub weather_code: u8,
    /// Maximum temperature in Celsius
    pub temperature_max: f64,
    /// Minimum temperature in Celsius
    pub temperature_min: f64,
}

#[derive(Deserialize)]
struct RawDailyForecast {
    dates: Vec<NaiveDate>,
    weather_codes: Vec<u8>,
    temperature_max: Vec<f64>,
    temperature_min: Vec<f64>,
}

impl TryFrom<RawDailyForecast> for DailyForecast {
    type Error = DomainError;

    fn try_from(raw: RawDailyForecast) -> Result<Self, Self::Error> {
        Self::new(
            raw.dates,
            raw.weather_codes,
            raw.temperature_max,
            raw.temperature_min,
        )
    }
}

impl DailyForecast {
    /// Build a forecast from its four series
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MisalignedSeries` if the series lengths differ.
    pub fn new(
        dates: Vec<NaiveDate>,
        weather_codes: Vec<u8>,
        temperature_max: Vec<f64>,
        temperature_min: Vec<f64>,
    ) -> Result<Self, DomainError> {
        let len = dates.len();
        if weather_codes.len() != len
            || temperature_max.len() != len
            || temperature_min.len() != len
        {
            return Err(DomainError::MisalignedSeries {
                dates: len,
                weather_codes: weather_codes.len(),
                temperature_max: temperature_max.len(),
                temperature_min: temperature_min.len(),
            });
        }

        Ok(Self {
            dates,
            weather_codes,
            temperature_max,
            temperature_min,
        })
    }

    /// Number of days in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series holds no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    #[must_use]
    pub fn weather_codes(&self) -> &[u8] {
        &self.weather_codes
    }

    #[must_use]
    pub fn temperature_max(&self) -> &[f64] {
        &self.temperature_max
    }

    #[must_use]
    pub fn temperature_min(&self) -> &[f64] {
        &self.temperature_min
    }

    /// Iterate over the aligned daily rows
    pub fn days(&self) -> impl Iterator<Item = DailyEntry> + '_ {
        self.dates
            .iter()
            .zip(&self.weather_codes)
            .zip(self.temperature_max.iter().zip(&self.temperature_min))
            .map(|((date, code), (max, min))| DailyEntry {
                date: *date,
                weather_code: *code,
                temperature_max: *max,
                temperature_min: *min,
            })
    }
}

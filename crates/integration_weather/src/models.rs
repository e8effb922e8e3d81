//! Open-Meteo response models
//!
//! Wire types mirror the JSON returned by the geocoding and forecast/archive
//! endpoints. Public types are the validated results handed to callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::WeatherError;

/// First geocoding match for a place name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Resolved place name as reported by the geocoder
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Aligned daily series (one entry per day)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub weather_codes: Vec<u8>,
    pub temperature_max: Vec<f64>,
    pub temperature_min: Vec<f64>,
}

/// Geocoding endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    /// Absent entirely when nothing matched
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeocodingResult> for Place {
    fn from(result: GeocodingResult) -> Self {
        Self {
            name: result.name,
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }
}

/// Forecast and archive endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct DailyResponse {
    #[serde(default)]
    pub daily: Option<DailyData>,
}

/// Raw `daily` block; the API emits `null` for days it has no data for
#[derive(Debug, Deserialize)]
pub(crate) struct DailyData {
    pub time: Vec<String>,
    #[serde(alias = "weathercode")]
    pub weather_code: Vec<Option<u8>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
}

impl TryFrom<DailyData> for DailySeries {
    type Error = WeatherError;

    fn try_from(data: DailyData) -> Result<Self, Self::Error> {
        let days = data.time.len();
        if data.weather_code.len() != days
            || data.temperature_2m_max.len() != days
            || data.temperature_2m_min.len() != days
        {
            return Err(WeatherError::ParseError(format!(
                "Misaligned daily series: {days} dates, {} codes, {} max, {} min",
                data.weather_code.len(),
                data.temperature_2m_max.len(),
                data.temperature_2m_min.len()
            )));
        }

        let dates = data
            .time
            .iter()
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|e| WeatherError::ParseError(format!("Invalid date {d:?}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dates,
            weather_codes: complete(data.weather_code, "weather_code")?,
            temperature_max: complete(data.temperature_2m_max, "temperature_2m_max")?,
            temperature_min: complete(data.temperature_2m_min, "temperature_2m_min")?,
        })
    }
}

/// Reject series with gaps
fn complete<T>(values: Vec<Option<T>>, field: &str) -> Result<Vec<T>, WeatherError> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.ok_or_else(|| WeatherError::ParseError(format!("Missing {field} for day {i}")))
        })
        .collect()
}

//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo geocoding, forecast and historical archive APIs
//! (<https://open-meteo.com>). No API key is required.

pub mod client;
mod condition;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use condition::WeatherCondition;
pub use models::{DailySeries, Place};

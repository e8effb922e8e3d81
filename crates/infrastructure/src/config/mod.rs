//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP listener, logging, static files
//! - `session`: session cookie and in-memory store
//!
//! Weather provider settings reuse [`integration_weather::WeatherConfig`] and
//! template settings reuse [`crate::templates::TemplateConfig`].
//!
//! Sources, later ones winning: built-in defaults, an optional `config.toml`
//! in the working directory, `SKYCAST_<SECTION>__<KEY>` environment variables,
//! and finally the bare `PORT` variable.

mod server;
mod session;

use std::num::ParseIntError;

use config::{Config, ConfigError, Environment, File, Source};
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use server::ServerConfig;
pub use session::SessionConfig;

use crate::templates::TemplateConfig;

/// Environment variable prefix for settings
const ENV_PREFIX: &str = "SKYCAST";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Open-Meteo endpoints and request settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Session cookie and store
    #[serde(default)]
    pub session: SessionConfig,

    /// Page templates
    #[serde(default)]
    pub templates: TemplateConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` and the environment
    ///
    /// `port` is the already parsed `PORT` override, see [`port_from_env`].
    pub fn load(port: Option<u16>) -> Result<Self, ConfigError> {
        Self::load_from(File::with_name("config").required(false), port)
    }

    /// Load configuration with an explicit file source and port override
    pub fn load_from<S>(file: S, port: Option<u16>) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            // e.g. SKYCAST_SESSION__IDLE_TIMEOUT_SECS=300
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", port.map(i64::from))?
            .build()?
            .try_deserialize()
    }
}

/// `PORT` was set to something that is not a port number
#[derive(Debug, Error)]
#[error("Invalid PORT value {value:?}: {source}")]
pub struct InvalidPort {
    pub value: String,
    #[source]
    pub source: ParseIntError,
}

/// Port from the `PORT` variable
///
/// Unset yields `Ok(None)`. The caller decides how to report an invalid value,
/// typically by logging it and falling back to the configured port.
pub fn port_from_env() -> Result<Option<u16>, InvalidPort> {
    parse_port(std::env::var("PORT").ok().as_deref())
}

fn parse_port(raw: Option<&str>) -> Result<Option<u16>, InvalidPort> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim().parse().map(Some).map_err(|source| InvalidPort {
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str, port: Option<u16>) -> AppConfig {
        AppConfig::load_from(File::from_str(toml, FileFormat::Toml), port)
            .expect("config should load")
    }

    #[test]
    fn defaults_without_any_source() {
        let config = from_toml("", None);

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.idle_timeout_secs, 600);
        assert_eq!(config.session.cookie_name, "skycast.sid");
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.server.static_dir, "public");
    }

    #[test]
    fn file_values_override_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 8080
            log_format = "json"

            [session]
            idle_timeout_secs = 120

            [weather]
            forecast_days = 3
            "#,
            None,
        );

        assert_eq!(config.server.port, 8080);
        assert!(config.server.json_logs());
        assert_eq!(config.session.idle_timeout().as_secs(), 120);
        assert_eq!(config.weather.forecast_days, 3);
        assert_eq!(config.weather.language, "en");
    }

    #[test]
    fn port_override_wins_over_file() {
        let config = from_toml("[server]\nport = 8080\n", Some(4000));

        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn port_parsing() {
        assert!(matches!(parse_port(None), Ok(None)));
        assert!(matches!(parse_port(Some("8080")), Ok(Some(8080))));
        assert!(matches!(parse_port(Some(" 4000 ")), Ok(Some(4000))));
    }

    #[test]
    fn invalid_port_is_reported_not_dropped() {
        let err = parse_port(Some("notaport")).unwrap_err();
        assert_eq!(err.value, "notaport");
        assert!(err.to_string().contains("notaport"));

        assert!(parse_port(Some("70000")).is_err());
        assert!(parse_port(Some("")).is_err());
    }

    #[test]
    fn invalid_value_is_an_error() {
        let result = AppConfig::load_from(
            File::from_str("[server]\nport = \"not a port\"\n", FileFormat::Toml),
            None,
        );

        assert!(result.is_err());
    }
}

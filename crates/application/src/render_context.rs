//! Render context handed to the view layer
//!
//! A read-only projection of the visitor session, optionally overridden by a
//! notice when a lookup could not be completed.

use domain::{DailyForecast, SessionState};
use serde::Serialize;

/// Everything the page template needs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderContext {
    /// Forecast to display, if any
    pub weather: Option<DailyForecast>,
    /// Place name, or a notice shown in its place
    pub city: Option<String>,
    /// WMO codes of the displayed forecast
    pub codes: Vec<u8>,
    /// Historical lookup to display, if any
    pub history: Option<DailyForecast>,
    /// Notice shown in the history panel when a historical lookup failed
    pub history_notice: Option<String>,
}

impl RenderContext {
    /// Project a session as is
    #[must_use]
    pub fn from_session(state: &SessionState) -> Self {
        Self {
            weather: state.weather.clone(),
            city: state.city.clone(),
            codes: state.codes.clone(),
            history: state.history.clone(),
            history_notice: None,
        }
    }

    /// Replace the city display with a notice
    ///
    /// Forecast and codes are cleared; history is kept from the session.
    #[must_use]
    pub fn with_message(state: &SessionState, message: impl Into<String>) -> Self {
        Self {
            weather: None,
            city: Some(message.into()),
            codes: Vec::new(),
            history: state.history.clone(),
            history_notice: None,
        }
    }

    /// Show the session's forecast with an empty history panel and a notice
    #[must_use]
    pub fn with_history_notice(state: &SessionState, notice: impl Into<String>) -> Self {
        Self {
            history: None,
            history_notice: Some(notice.into()),
            ..Self::from_session(state)
        }
    }
}

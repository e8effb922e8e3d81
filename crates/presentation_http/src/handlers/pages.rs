//! Weather page handlers
//!
//! Each handler reads its query parameters leniently: a parameter that is
//! absent, blank or unparseable is passed on as missing, and the lookup
//! service turns that into the matching notice on the page.

use application::RenderContext;
use axum::{
    Extension,
    extract::{Query, State},
    response::Html,
};
use chrono::NaiveDate;
use domain::SessionId;
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

/// Query for `/weather`
#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// Query for `/weatherByLocation`
#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Query for `/history`
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub city: Option<String>,
    pub date: Option<String>,
}

/// Parse a decimal coordinate, rejecting non-finite values
fn coordinate(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an ISO `YYYY-MM-DD` date
fn iso_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), "%Y-%m-%d").ok()
}

fn render(state: &AppState, page: &RenderContext) -> Result<Html<String>, ApiError> {
    Ok(Html(state.templates.render_index(page)?))
}

/// `GET /` - show the session as is
pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, ApiError> {
    let page = state.lookup_service.home(&session).await?;
    render(&state, &page)
}

/// `GET /weather?city=` - forecast for a city name
pub async fn weather(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<CityQuery>,
) -> Result<Html<String>, ApiError> {
    let page = state
        .lookup_service
        .search_by_city(&session, query.city.as_deref())
        .await?;
    render(&state, &page)
}

/// `GET /weatherByLocation?lat=&lon=` - forecast for browser coordinates
pub async fn weather_by_location(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<LocationQuery>,
) -> Result<Html<String>, ApiError> {
    let page = state
        .lookup_service
        .search_by_location(
            &session,
            coordinate(query.lat.as_deref()),
            coordinate(query.lon.as_deref()),
        )
        .await?;
    render(&state, &page)
}

/// `GET /history?city=&date=` - observed weather for one past day
pub async fn history(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<HistoryQuery>,
) -> Result<Html<String>, ApiError> {
    let page = state
        .lookup_service
        .historical_lookup(
            &session,
            query.city.as_deref(),
            iso_date(query.date.as_deref()),
        )
        .await?;
    render(&state, &page)
}

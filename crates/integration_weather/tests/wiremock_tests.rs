//! Integration tests for the Open-Meteo client using wiremock
//!
//! These tests run the client against a mock HTTP server standing in for the
//! geocoding, forecast and archive endpoints.

use chrono::NaiveDate;
use integration_weather::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample geocoding response with a single match
fn sample_geocoding_response() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 2_643_743,
            "name": "London",
            "latitude": 51.508_53,
            "longitude": -0.125_74,
            "elevation": 25.0,
            "country_code": "GB",
            "timezone": "Europe/London",
            "country": "United Kingdom"
        }],
        "generationtime_ms": 0.7
    })
}

/// Sample daily block as returned by the forecast and archive endpoints
fn sample_daily_response(days: &[&str]) -> serde_json::Value {
    let n = days.len();
    let codes = &[3, 61, 2, 0, 1, 45, 80][..n];
    let max = &[8.0, 6.0, 10.0, 11.0, 9.5, 7.0, 6.5][..n];
    let min = &[2.0, 1.0, 3.0, 4.0, 2.5, 1.0, 0.5][..n];
    serde_json::json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "timezone": "Europe/London",
        "daily_units": {
            "time": "iso8601",
            "weathercode": "wmo code",
            "temperature_2m_max": "°C",
            "temperature_2m_min": "°C"
        },
        "daily": {
            "time": days,
            "weathercode": codes,
            "temperature_2m_max": max,
            "temperature_2m_min": min
        }
    })
}

/// Create a test client configured to use the mock server for every endpoint
fn create_test_client(mock_server: &MockServer) -> OpenMeteoClient {
    let config = WeatherConfig {
        geocoding_base_url: mock_server.uri(),
        forecast_base_url: mock_server.uri(),
        archive_base_url: mock_server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    OpenMeteoClient::new(config).expect("Failed to create client")
}

async fn mount(mock_server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn test_geocode_returns_first_match() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "London"))
        .and(query_param("count", "1"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_geocoding_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let place = client.geocode("London").await.expect("should geocode");

    assert_eq!(place.name, "London");
    assert!((place.latitude - 51.508_53).abs() < 1e-9);
    assert!((place.longitude + 0.125_74).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_encodes_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "São Paulo & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_geocoding_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.geocode("São Paulo & Co").await.is_ok());
}

#[tokio::test]
async fn test_geocode_without_results_is_not_found() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/search",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"generationtime_ms": 0.3})),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.geocode("Atlantis").await;

    assert!(matches!(result, Err(WeatherError::LocationNotFound(name)) if name == "Atlantis"));
}

#[tokio::test]
async fn test_geocode_with_empty_results_is_not_found() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/search",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.geocode("Atlantis").await;

    assert!(matches!(result, Err(WeatherError::LocationNotFound(_))));
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn test_daily_forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "51.5"))
        .and(query_param("longitude", "-0.12"))
        .and(query_param(
            "daily",
            "weathercode,temperature_2m_max,temperature_2m_min",
        ))
        .and(query_param("timezone", "auto"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_daily_response(&["2024-01-15", "2024-01-16"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let series = client
        .daily_forecast(51.5, -0.12)
        .await
        .expect("should fetch forecast");

    assert_eq!(series.dates.len(), 2);
    assert_eq!(series.weather_codes, vec![3, 61]);
    assert_eq!(series.temperature_max, vec![8.0, 6.0]);
    assert_eq!(series.temperature_min, vec![2.0, 1.0]);
}

#[tokio::test]
async fn test_daily_forecast_rate_limited() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(429)).await;

    let client = create_test_client(&mock_server);
    let result = client.daily_forecast(51.5, -0.12).await;

    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_daily_forecast_server_error() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/forecast", ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server);
    let result = client.daily_forecast(51.5, -0.12).await;

    assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_daily_forecast_client_error() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.daily_forecast(51.5, -0.12).await;

    assert!(matches!(result, Err(WeatherError::RequestFailed(_))));
}

#[tokio::test]
async fn test_daily_forecast_invalid_json() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.daily_forecast(51.5, -0.12).await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_daily_forecast_missing_daily_block() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"latitude": 51.5})),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.daily_forecast(51.5, -0.12).await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_daily_forecast_null_entries() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2024-01-15"],
                "weathercode": [null],
                "temperature_2m_max": [8.0],
                "temperature_2m_min": [2.0]
            }
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.daily_forecast(51.5, -0.12).await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_invalid_coordinates_never_hit_the_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.daily_forecast(0.0, 200.0).await;

    assert!(matches!(result, Err(WeatherError::InvalidCoordinates)));
}

// ============================================================================
// Archive
// ============================================================================

#[tokio::test]
async fn test_daily_archive_requests_single_day() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/archive"))
        .and(query_param("start_date", "2020-06-01"))
        .and(query_param("end_date", "2020-06-01"))
        .and(query_param("latitude", "48.85"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_daily_response(&["2020-06-01"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let date = NaiveDate::from_ymd_opt(2020, 6, 1).expect("valid date");
    let series = client
        .daily_archive(48.85, 2.35, date)
        .await
        .expect("should fetch archive");

    assert_eq!(series.dates, vec![date]);
    assert_eq!(series.weather_codes, vec![3]);
}

#[tokio::test]
async fn test_daily_archive_out_of_range_date() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/archive",
        ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Parameter 'start_date' is out of allowed range"
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let date = NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid date");
    let result = client.daily_archive(48.85, 2.35, date).await;

    assert!(matches!(result, Err(WeatherError::RequestFailed(_))));
}

#[tokio::test]
async fn test_connection_refused_is_request_failure() {
    let config = WeatherConfig {
        forecast_base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    let client = OpenMeteoClient::new(config).expect("Failed to create client");

    let result = client.daily_forecast(51.5, -0.12).await;

    assert!(matches!(result, Err(WeatherError::RequestFailed(_))));
}

//! Route definitions

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::{handlers, middleware::SessionLayer, state::AppState};

/// Create the main router with all routes
///
/// Page routes run behind the session layer; `/health` and static files do
/// not touch the session.
pub fn create_router(state: AppState) -> Router {
    let session_layer = SessionLayer::from_config(&state.config.session);
    let static_files = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        // Weather pages
        .route("/", get(handlers::pages::home))
        .route("/weather", get(handlers::pages::weather))
        .route("/weatherByLocation", get(handlers::pages::weather_by_location))
        .route("/history", get(handlers::pages::history))
        .route_layer(session_layer)
        // Liveness
        .route("/health", get(handlers::health::health_check))
        // Anything else is looked up in the static directory
        .fallback_service(static_files)
        .with_state(state)
}

//! Skycast HTTP Server
//!
//! Main entry point for the weather web server.

use std::{sync::Arc, time::Duration};

use application::{LookupService, SessionStorePort, WeatherPort};
use infrastructure::{AppConfig, MokaSessionStore, TemplateEngine, WeatherAdapter, port_from_env};
use presentation_http::{
    error::set_expose_internal_errors,
    routes,
    shutdown::{drain_within, shutdown_signal},
    state::AppState,
};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config comes first so the log filter and format can be taken from it.
    // Problems are reported once the subscriber is installed.
    let (port, port_error) = match port_from_env() {
        Ok(port) => (port, None),
        Err(e) => (None, Some(e)),
    };
    let (config, load_error) = match AppConfig::load(port) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config);

    info!("🌤️ Skycast v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(e) = port_error {
        warn!(value = %e.value, error = %e.source, "Ignoring invalid PORT");
    }
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        idle_timeout_secs = config.session.idle_timeout_secs,
        static_dir = %config.server.static_dir,
        "Configuration loaded"
    );

    set_expose_internal_errors(config.server.expose_internal_errors);

    let weather: Arc<dyn WeatherPort> = Arc::new(
        WeatherAdapter::with_config(config.weather.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?,
    );
    let sessions: Arc<dyn SessionStorePort> =
        Arc::new(MokaSessionStore::from_config(&config.session));

    let templates = TemplateEngine::with_config(config.templates.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load templates: {e}"))?;

    let config = Arc::new(config);
    let state = AppState {
        lookup_service: Arc::new(LookupService::new(weather, sessions)),
        templates,
        config: Arc::clone(&config),
    };

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let draining = Arc::new(Notify::new());

    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let draining = Arc::clone(&draining);
            async move {
                shutdown_signal().await;
                draining.notify_one();
            }
        })
        .into_future();

    drain_within(server, draining, shutdown_timeout).await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Install the global subscriber: `RUST_LOG` wins over the configured filter
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if config.server.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

//! Application state shared across handlers

use std::sync::Arc;

use application::LookupService;
use infrastructure::{AppConfig, TemplateEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Weather lookup flows backing the page routes
    pub lookup_service: Arc<LookupService>,
    /// Page renderer
    pub templates: TemplateEngine,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("lookup_service", &self.lookup_service)
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

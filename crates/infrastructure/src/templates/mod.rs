//! Template engine module for rendering the weather page
//!
//! Uses the Tera templating engine. The page template is embedded at compile
//! time and may be replaced by an `index.html` in a configurable directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use application::RenderContext;
//! use infrastructure::templates::TemplateEngine;
//!
//! let engine = TemplateEngine::new()?;
//! let html = engine.render_index(&RenderContext::default())?;
//! ```

use std::{collections::HashMap, path::Path, sync::Arc};

use application::RenderContext;
use domain::{DailyEntry, DailyForecast};
use integration_weather::WeatherCondition;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera, Value};
use thiserror::Error;
use tracing::{debug, info};

/// Name under which the page template is registered
pub const INDEX_TEMPLATE: &str = "index.html";

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Directory holding an `index.html` that replaces the embedded page
    #[serde(default)]
    pub templates_dir: Option<String>,
}

/// One table row of the forecast or history panel
#[derive(Debug, Clone, Serialize)]
struct DayRow {
    date: String,
    weekday: String,
    code: u8,
    condition: &'static str,
    icon: &'static str,
    wet: bool,
    max: f64,
    min: f64,
}

impl From<DailyEntry> for DayRow {
    fn from(day: DailyEntry) -> Self {
        let condition = WeatherCondition::from_wmo_code(day.weather_code);
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            weekday: day.date.format("%a").to_string(),
            code: day.weather_code,
            condition: condition.label(),
            icon: condition.icon(),
            wet: condition.is_wet(),
            max: day.temperature_max,
            min: day.temperature_min,
        }
    }
}

fn rows(forecast: Option<&DailyForecast>) -> Vec<DayRow> {
    forecast
        .map(|f| f.days().map(DayRow::from).collect())
        .unwrap_or_default()
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Skycast</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
<main>
    <h1>Skycast</h1>

    <section class="search">
        <form action="/weather" method="get">
            <input type="text" name="city" placeholder="Enter a city" aria-label="City">
            <button type="submit">Search</button>
        </form>
        <button type="button" id="locate">Use my location</button>
    </section>

    {% if city %}<h2 class="city">{{ city }}</h2>{% endif %}

    {% if forecast %}
    <table class="forecast" data-codes="{{ codes }}">
        <thead>
            <tr><th>Day</th><th>Conditions</th><th>Max</th><th>Min</th></tr>
        </thead>
        <tbody>
        {% for day in forecast %}
            <tr class="{% if day.wet %}wet{% else %}dry{% endif %}" data-code="{{ day.code }}">
                <td><time datetime="{{ day.date }}">{{ day.weekday }} {{ day.date }}</time></td>
                <td>{{ day.icon }} {{ day.condition }}</td>
                <td>{{ day.max | temperature }}</td>
                <td>{{ day.min | temperature }}</td>
            </tr>
        {% endfor %}
        </tbody>
    </table>
    {% endif %}

    <section class="history">
        <h2>Past weather</h2>
        <form action="/history" method="get">
            <input type="text" name="city" placeholder="City" aria-label="City">
            <input type="date" name="date" aria-label="Date">
            <button type="submit">Look up</button>
        </form>
        {% if history_notice %}<p class="notice">{{ history_notice }}</p>{% endif %}
        {% if history %}
        <table class="archive">
            <tbody>
            {% for day in history %}
                <tr data-code="{{ day.code }}">
                    <td><time datetime="{{ day.date }}">{{ day.weekday }} {{ day.date }}</time></td>
                    <td>{{ day.icon }} {{ day.condition }}</td>
                    <td>{{ day.max | temperature }}</td>
                    <td>{{ day.min | temperature }}</td>
                </tr>
            {% endfor %}
            </tbody>
        </table>
        {% endif %}
    </section>
</main>
<script>
document.getElementById("locate").addEventListener("click", function () {
    if (!navigator.geolocation) {
        window.location.href = "/weatherByLocation";
        return;
    }
    navigator.geolocation.getCurrentPosition(
        function (pos) {
            window.location.href = "/weatherByLocation?lat=" + pos.coords.latitude +
                "&lon=" + pos.coords.longitude;
        },
        function () {
            window.location.href = "/weatherByLocation";
        }
    );
});
</script>
</body>
</html>
"#;
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    config: TemplateConfig,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Create a new template engine with default configuration
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_config(TemplateConfig::default())
    }

    /// Create a new template engine with custom configuration
    pub fn with_config(config: TemplateConfig) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_template(INDEX_TEMPLATE, embedded::INDEX)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        if let Some(ref dir) = config.templates_dir {
            let path = Path::new(dir).join(INDEX_TEMPLATE);
            if path.is_file() {
                tera.add_template_file(&path, Some(INDEX_TEMPLATE))
                    .map_err(|e| TemplateError::Compile(e.to_string()))?;
                info!(path = %path.display(), "Loaded custom page template");
            } else {
                debug!(dir = %dir, "No custom page template, using embedded");
            }
        }

        tera.register_filter("temperature", temperature_filter);

        Ok(Self {
            tera: Arc::new(tera),
            config,
        })
    }

    /// Render the weather page for a render context
    pub fn render_index(&self, page: &RenderContext) -> Result<String, TemplateError> {
        let mut ctx = Context::new();
        ctx.insert("city", &page.city);
        ctx.insert("forecast", &rows(page.weather.as_ref()));
        ctx.insert(
            "codes",
            &page
                .codes
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(","),
        );
        ctx.insert("history", &rows(page.history.as_ref()));
        ctx.insert("history_notice", &page.history_notice);

        self.tera
            .render(INDEX_TEMPLATE, &ctx)
            .map_err(TemplateError::from)
    }
}

/// Custom filter: Format a number as degrees Celsius with one decimal
fn temperature_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let degrees = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg("temperature requires a number"))?;
    Ok(Value::String(format!("{degrees:.1}°C")))
}

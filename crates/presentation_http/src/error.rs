//! API error handling
//!
//! Lookup failures never get here: they are rendered as notices on the page
//! with a `200`. What remains are faults of the server itself (session store,
//! templates), answered with a small `500` HTML page. Internal details are
//! only shown when explicitly enabled.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use infrastructure::TemplateError;
use thiserror::Error;
use tracing::error;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Configure whether internal error details should be exposed in responses.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");

        let details = if should_expose_details() {
            format!("<pre>{}</pre>", tera::escape_html(&self.to_string()))
        } else {
            String::new()
        };

        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\
             <head><meta charset=\"UTF-8\"><title>Skycast</title></head>\
             <body><h1>An internal error occurred</h1>{details}\
             <p><a href=\"/\">Back to Skycast</a></p></body></html>"
        );

        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[test]
    fn api_error_internal_message() {
        let err = ApiError::Internal("store unavailable".to_string());
        assert_eq!(err.to_string(), "Internal error: store unavailable");
    }

    #[test]
    fn every_application_error_is_internal() {
        let err: ApiError = ApplicationError::Internal("boom".into()).into();
        assert!(matches!(err, ApiError::Internal(msg) if msg.contains("boom")));

        // Lookup failures are normally turned into notices; should one ever
        // escape it is still a server fault, not a client error
        let err: ApiError = ApplicationError::ExternalService("down".into()).into();
        assert!(matches!(err, ApiError::Internal(msg) if msg.contains("down")));
    }

    #[test]
    fn from_template_error() {
        let err: ApiError = TemplateError::Render("bad filter".into()).into();
        assert!(matches!(err, ApiError::Internal(msg) if msg.contains("bad filter")));
    }

    #[tokio::test]
    async fn response_is_500_html_without_details() {
        let response = ApiError::Internal("secret path /etc/passwd".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("An internal error occurred"));
        assert!(!body.contains("passwd"));
    }
}

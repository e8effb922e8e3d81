//! Session cookie middleware
//!
//! Resolves the visitor's [`SessionId`] from the session cookie, or starts a
//! new session when the cookie is missing or does not hold a valid id. The id
//! is stored in the request extensions for handlers and carried in the
//! tracing span. Every response refreshes the cookie so that its lifetime
//! follows the server-side idle window.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use axum::{
    extract::Request,
    http::header::{HeaderValue, SET_COOKIE},
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domain::SessionId;
use infrastructure::SessionConfig;
use tower::{Layer, Service};
use tracing::{Instrument, debug};

/// Cookie attributes for the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Cookie name
    pub cookie_name: String,
    /// Cookie lifetime, matching the store's idle window
    pub max_age: Duration,
    /// Only send the cookie over HTTPS
    pub secure: bool,
}

impl SessionSettings {
    /// Settings derived from the session configuration
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            max_age: config.idle_timeout(),
            secure: config.secure_cookie,
        }
    }

    /// `Set-Cookie` value for a session id
    fn set_cookie(&self, session: SessionId) -> String {
        let max_age = time::Duration::try_from(self.max_age).unwrap_or(time::Duration::MAX);

        Cookie::build((self.cookie_name.clone(), session.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .secure(self.secure)
            .build()
            .to_string()
    }

    /// Session id carried by the request cookies, if valid
    fn session_from(&self, request: &Request) -> Option<SessionId> {
        CookieJar::from_headers(request.headers())
            .get(&self.cookie_name)
            .and_then(|cookie| SessionId::parse(cookie.value()).ok())
    }
}

/// Layer that attaches a visitor session to each request
#[derive(Debug, Clone)]
pub struct SessionLayer {
    settings: Arc<SessionSettings>,
}

impl SessionLayer {
    /// Create a new session layer
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Create a session layer from the session configuration
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(SessionSettings::from_config(config))
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            settings: Arc::clone(&self.settings),
        }
    }
}

/// Service that resolves the session before calling the inner service
#[derive(Debug, Clone)]
pub struct SessionService<S> {
    inner: S,
    settings: Arc<SessionSettings>,
}

impl<S> Service<Request> for SessionService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        let session = self.settings.session_from(&request).unwrap_or_else(|| {
            let session = SessionId::new();
            debug!(%session, "Issuing new session");
            session
        });

        request.extensions_mut().insert(session);

        let span = tracing::info_span!("session", session = %session);
        let cookie = HeaderValue::from_str(&self.settings.set_cookie(session));

        // Take the service that was polled ready, leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                if let Ok(value) = cookie {
                    response.headers_mut().append(SET_COOKIE, value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

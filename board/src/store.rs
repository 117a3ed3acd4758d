//! Location store: async transport between the board and the backend.
//!
//! [`LocationStore`] is the seam the session talks to; [`HttpLocationStore`]
//! is the `reqwest` implementation. Response classification lives in pure
//! functions so it can be tested without a server.
//!
//! The final-layout endpoint answers a successful save with a redirect to the
//! end page. Redirects are not followed: they come back as
//! [`SaveOutcome::Redirect`] so the host can navigate.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::persist::SavePayload;

/// What the backend said about an accepted save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Navigate the host to this absolute URL.
    Redirect(String),
    /// JSON body, usually `{"message": ...}`. `Null` for an empty body.
    Json(Value),
}

impl SaveOutcome {
    /// The backend's `message` field, if it sent one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Json(body) => body.get("message").and_then(Value::as_str),
            Self::Redirect(_) => None,
        }
    }
}

/// Error from a transport round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend returned a non-success status.
    #[error("backend returned status {status}")]
    Response { status: u16, body: String },

    /// The response body was not JSON.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The HTTP client could not be built.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Async transport for layouts. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LocationStore: Send + Sync {
    /// Send a save payload to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request fails or the backend
    /// rejects the payload.
    async fn save(&self, endpoint: &str, payload: &SavePayload) -> Result<SaveOutcome, TransportError>;

    /// Fetch the raw load payload from `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request fails, the status is not
    /// a success, or the body is not JSON.
    async fn load(&self, endpoint: &str) -> Result<Value, TransportError>;
}

// =============================================================================
// HTTP
// =============================================================================

pub struct HttpLocationStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLocationStore {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &StoreConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl LocationStore for HttpLocationStore {
    async fn save(&self, endpoint: &str, payload: &SavePayload) -> Result<SaveOutcome, TransportError> {
        let url = join_url(&self.base_url, endpoint);
        debug!(%url, locations = payload.locations.len(), "sending save");

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let location = response.headers().get(reqwest::header::LOCATION).and_then(header_text);
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let outcome = classify_save_response(&self.base_url, status, location.as_deref(), &text)?;
        info!(%url, status, "save accepted");
        Ok(outcome)
    }

    async fn load(&self, endpoint: &str) -> Result<Value, TransportError> {
        let url = join_url(&self.base_url, endpoint);
        debug!(%url, "loading layout");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        parse_load_response(status, &text)
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Join a base URL and an endpoint path with exactly one slash between them.
#[must_use]
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}

/// Resolve a `Location` header against the backend base URL.
#[must_use]
pub fn resolve_location(base_url: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        location.to_owned()
    } else {
        join_url(base_url, location)
    }
}

/// Turn a raw save response into an outcome.
///
/// # Errors
///
/// Returns [`TransportError::Response`] for error statuses and for redirects
/// without a `Location`, and [`TransportError::Parse`] for a non-JSON success body.
pub fn classify_save_response(
    base_url: &str,
    status: u16,
    location: Option<&str>,
    body: &str,
) -> Result<SaveOutcome, TransportError> {
    match status {
        200..=299 => {
            if body.trim().is_empty() {
                return Ok(SaveOutcome::Json(Value::Null));
            }
            serde_json::from_str(body)
                .map(SaveOutcome::Json)
                .map_err(|e| TransportError::Parse(e.to_string()))
        }
        300..=399 => match location {
            Some(location) => Ok(SaveOutcome::Redirect(resolve_location(base_url, location))),
            None => Err(TransportError::Response { status, body: "redirect without Location header".into() }),
        },
        _ => Err(TransportError::Response { status, body: body.to_owned() }),
    }
}

/// Turn a raw load response into the JSON value for the persistence adapter.
///
/// # Errors
///
/// Returns [`TransportError::Response`] for non-success statuses and
/// [`TransportError::Parse`] for a body that is not JSON.
pub fn parse_load_response(status: u16, body: &str) -> Result<Value, TransportError> {
    if !(200..=299).contains(&status) {
        return Err(TransportError::Response { status, body: body.to_owned() });
    }
    serde_json::from_str(body).map_err(|e| TransportError::Parse(e.to_string()))
}

fn header_text(value: &reqwest::header::HeaderValue) -> Option<String> {
    match value.to_str() {
        Ok(text) => Some(text.to_owned()),
        Err(_) => None,
    }
}

//! HTTP client for the crop prediction service.
//!
//! Every operation is a single blocking request/response round trip: no
//! retries, no caching, no session. Failures come back as `CrsError` and
//! are never replaced with sample data.
//!
//! Submodules:
//! - `predict`:   `/api/predict` plus response enrichment.
//! - `feedback`:  `/api/feedback` and feedback statistics.
//! - `health`:    `/health` polling.
//! - `farms`:     farm profiles and recommendation history.
//! - `auxiliary`: weather, soil and market-price pass-through endpoints.
//! - `chatbot`:   the service-side farming assistant.

pub mod auxiliary;
pub mod chatbot;
pub mod farms;
pub mod feedback;
pub mod health;
pub mod predict;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::model::CrsError;

/// Path prefix for everything except the health probe.
pub const API_PREFIX: &str = "/api";

/// Blocking client bound to one service root.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Client with the transport's default timeout.
    pub fn new(base_url: &str) -> Result<Self, CrsError> {
        Self::build(base_url, None)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, CrsError> {
        Self::build(&config.base_url, config.timeout_secs.map(Duration::from_secs))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self, CrsError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| CrsError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api{path}`
    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// `{base}/api/{segments...}` with each segment percent-encoded.
    fn api_url_with_segments(&self, segments: &[&str]) -> Result<reqwest::Url, CrsError> {
        let mut url = reqwest::Url::parse(&self.api_url(""))
            .map_err(|e| CrsError::Network(format!("invalid service URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| CrsError::Network(format!("invalid service URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{base}{path}`, outside the `/api` prefix.
    fn root_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a prepared request and decodes a 2xx JSON body into `R`.
    fn send_json<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, CrsError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .map_err(|e| CrsError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().map_err(|e| CrsError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| CrsError::Parse(e.to_string()))
    }
}

/// Builds a `CrsError::Service` from a non-2xx response body.
///
/// The service reports failures as `{"detail": ...}`. A string detail is used
/// verbatim; structured details (request validation lists) are rendered as
/// compact JSON. A missing, null or blank detail falls back to the status
/// code.
pub fn service_error(status: u16, body: &str) -> CrsError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("detail").cloned())
        .filter(|detail| !detail.is_null())
        .map(|detail| match detail {
            Value::String(text) => text,
            other => other.to_string(),
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error: {}", status));

    CrsError::Service { status, message }
}

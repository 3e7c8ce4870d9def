//! HTTP client for the user settings endpoint.
//!
//! Both calls authenticate with a bearer token and map HTTP status codes to
//! [`ApiError`] variants. The token is passed per call and never stored.

use std::time::Duration;

use crate::error::ApiError;
use crate::types::{SaveTabRequest, UserSettings};

/// Path of the settings endpoint, relative to the base URL.
pub const SETTINGS_PATH: &str = "/api/user/settings";

/// Async client for reading and writing a user's saved board.
#[derive(Debug, Clone)]
pub struct SettingsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SettingsClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` is not an absolute
    /// http(s) URL, or [`ApiError::Network`] if the HTTP stack fails to
    /// initialise.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = base_url.trim_end_matches('/');
        let scheme_ok = base.starts_with("http://") || base.starts_with("https://");
        if !scheme_ok || base.contains(char::is_whitespace) {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base.to_string(),
        })
    }

    /// Full URL of the settings endpoint.
    pub fn settings_url(&self) -> String {
        format!("{}{}", self.base_url, SETTINGS_PATH)
    }

    /// Fetch the saved board (`GET /api/user/settings`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - the request fails before a response arrives
    /// - the server returns 401, 429, 5xx or another non-2xx status
    /// - the body is not a settings object
    pub async fn fetch_settings(&self, token: &str) -> Result<UserSettings, ApiError> {
        let response = self
            .http
            .get(self.settings_url())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body = check_status(response)?
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Save one tab's arrays (`PUT /api/user/settings`).
    ///
    /// # Errors
    ///
    /// Same status mapping as [`fetch_settings`](Self::fetch_settings); the
    /// response body is ignored.
    pub async fn save_tab(&self, token: &str, request: &SaveTabRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.settings_url())
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(response).map(|_| ())
    }
}

/// Map a response to itself on 2xx, or to the matching error otherwise.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status().as_u16();

    match status {
        200..=299 => Ok(response),
        401 => Err(ApiError::Unauthorized),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            Err(ApiError::RateLimited { retry_after })
        }
        500..=599 => Err(ApiError::Server(status)),
        _ => Err(ApiError::Unexpected(status)),
    }
}

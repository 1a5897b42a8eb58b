//! Shared HTTP plumbing for the public Polymarket REST APIs.
//!
//! One `reqwest` client is built per invocation and shared by the Gamma and
//! CLOB adapters. Requests are attempted once; a non-2xx status becomes
//! [`Error::Upstream`] carrying the status and response body.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::settings::HttpConfig;
use crate::error::{Error, Result};

/// Thin JSON-over-HTTP client.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: HttpClient,
}

impl RestClient {
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .user_agent(concat!("pmctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self { http }
    }

    /// GET `url` with `query` and decode the JSON body.
    ///
    /// `service` names the upstream in error messages.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] on transport failure or timeout.
    /// - [`Error::Upstream`] on a non-2xx status.
    /// - [`Error::Json`] when the body does not match `T`.
    pub async fn get_json<T>(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(service, url = %url, ?query, "GET");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(service, url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(Error::Upstream {
                service,
                status: status.as_u16(),
                body: truncate(&body, 500),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!(service, error = %e, body = %truncate(&body, 200), "Failed to decode response");
            Error::Json(e)
        })
    }
}

fn truncate(body: &str, max: usize) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

//! HTTP Transport Adapter
//!
//! Outbound HTTP for every provider call and binary download. All clients are
//! pinned to IPv4 dialing: deployments of this system have hit broken IPv6
//! name-resolution paths, and binding the local address to `0.0.0.0`
//! restricts connections to IPv4 without touching the resolver.
//!
//! JSON calls return non-2xx statuses as data so adapters can read vendor
//! error envelopes; binary downloads treat non-2xx as an error. Both paths
//! enforce a hard deadline after which the in-flight request is aborted, so
//! callers always see either a complete parsed body or an error.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

use crate::defaults;
use crate::error::AiError;
use crate::retry::RetryOutcome;

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Deadline for JSON API calls
    pub request_timeout: Duration,
    /// Deadline for binary downloads
    pub download_timeout: Duration,
    /// Deadline for connection establishment
    pub connect_timeout: Duration,
    /// User-Agent header for outbound requests
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: defaults::http::REQUEST_TIMEOUT,
            download_timeout: defaults::http::DOWNLOAD_TIMEOUT,
            connect_timeout: defaults::http::CONNECT_TIMEOUT,
            user_agent: defaults::http::USER_AGENT.to_string(),
        }
    }
}

/// A fully received JSON response.
///
/// Non-2xx statuses are carried as data, not as errors: vendor error
/// envelopes live in `body` and the caller decides what to do with them.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub ok: bool,
    pub body: Value,
}

impl RetryOutcome for HttpResponse {
    fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    fn is_retryable(&self) -> bool {
        self.status >= 500
    }
}

/// Build an IPv4-pinned reqwest client from a transport configuration.
pub fn build_http_client(config: &TransportConfig) -> Result<reqwest::Client, AiError> {
    reqwest::Client::builder()
        .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        .connect_timeout(config.connect_timeout)
        .redirect(reqwest::redirect::Policy::limited(
            defaults::http::MAX_REDIRECTS,
        ))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| AiError::HttpError(format!("Failed to create HTTP client: {e}")))
}

/// Shared transport handle used by all adapters and the asset cache.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self, AiError> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with explicit configuration
    pub fn with_config(config: TransportConfig) -> Result<Self, AiError> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    /// Issue a request and await the full JSON body.
    ///
    /// Returns `Ok` for any status the server produced, including 4xx/5xx.
    /// Errors are reserved for transport faults (connect, deadline, body
    /// read) and unparseable bodies.
    pub async fn request_json(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<HttpResponse, AiError> {
        debug!(%method, url, "issuing JSON request");

        let mut request = self
            .client
            .request(method, url)
            .headers(headers)
            .timeout(self.config.request_timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_send_error)?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            AiError::ParseError(format!("Response body is not valid JSON: {e}"))
        })?;

        Ok(HttpResponse {
            status,
            ok: (200..300).contains(&status),
            body,
        })
    }

    /// Download a binary payload, following redirects.
    ///
    /// Unlike [`request_json`](Self::request_json), a non-2xx status here is
    /// an error: there is no envelope worth inspecting in a failed asset
    /// fetch.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, AiError> {
        debug!(url, "downloading binary asset");

        let response = self
            .client
            .get(url)
            .timeout(self.config.download_timeout)
            .send()
            .await
            .map_err(map_download_error)?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(AiError::HttpError(format!("Download failed: HTTP {status}")));
        }

        let bytes = response.bytes().await.map_err(map_download_error)?;
        Ok(bytes.to_vec())
    }
}

fn map_send_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::TimeoutError("Request timeout".to_string())
    } else if e.is_connect() {
        AiError::ConnectionError(format!("{e}"))
    } else {
        AiError::HttpError(format!("{e}"))
    }
}

fn map_download_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::TimeoutError("Download timeout".to_string())
    } else if e.is_connect() {
        AiError::ConnectionError(format!("{e}"))
    } else {
        AiError::HttpError(format!("{e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client_default() {
        let config = TransportConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_response_retry_outcome() {
        let ok = HttpResponse {
            status: 200,
            ok: true,
            body: Value::Null,
        };
        assert!(!ok.is_client_error());
        assert!(!ok.is_retryable());

        let not_found = HttpResponse {
            status: 404,
            ok: false,
            body: Value::Null,
        };
        assert!(not_found.is_client_error());
        assert!(!not_found.is_retryable());

        let unavailable = HttpResponse {
            status: 503,
            ok: false,
            body: Value::Null,
        };
        assert!(!unavailable.is_client_error());
        assert!(unavailable.is_retryable());
    }

    #[test]
    fn test_default_config_deadlines() {
        let config = TransportConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.download_timeout, Duration::from_secs(120));
    }
}

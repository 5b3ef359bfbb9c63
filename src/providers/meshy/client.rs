//! Meshy client construction and configuration

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

use crate::defaults;
use crate::error::AiError;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::transport::{HttpResponse, HttpTransport};

use super::utils;

/// Tuning knobs for the Meshy adapter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeshyOptions {
    pub art_style: Option<String>,
    pub negative_prompt: Option<String>,
}

/// Meshy adapter implementing the model generation capability
#[derive(Debug, Clone)]
pub struct MeshyClient {
    pub(crate) api_key: SecretString,
    pub(crate) base_url: String,
    pub(crate) transport: HttpTransport,
    pub(crate) retry: RetryExecutor,
    pub(crate) options: MeshyOptions,
}

impl MeshyClient {
    /// Create a new Meshy adapter
    pub fn new(api_key: impl Into<String>, options: MeshyOptions) -> Result<Self, AiError> {
        Ok(Self {
            api_key: SecretString::from(api_key.into()),
            base_url: defaults::meshy::BASE_URL.to_string(),
            transport: HttpTransport::new()?,
            retry: RetryExecutor::default(),
            options,
        })
    }

    /// Override the API base URL (tests, gateways)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a shared transport instead of a per-client one
    pub fn with_transport(mut self, transport: HttpTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = RetryExecutor::new(policy);
        self
    }

    pub(crate) fn art_style(&self) -> &str {
        self.options
            .art_style
            .as_deref()
            .unwrap_or(defaults::meshy::ART_STYLE)
    }

    pub(crate) fn negative_prompt(&self) -> &str {
        self.options
            .negative_prompt
            .as_deref()
            .unwrap_or(defaults::meshy::NEGATIVE_PROMPT)
    }

    /// Issue one authenticated POST; passed to the retry executor as the
    /// repeatable operation.
    pub(crate) async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, AiError> {
        let headers = utils::build_headers(self.api_key.expose_secret())?;
        self.transport
            .request_json(Method::POST, url, headers, Some(body))
            .await
    }

    /// Issue one authenticated GET.
    pub(crate) async fn get_json(&self, url: &str) -> Result<HttpResponse, AiError> {
        let headers = utils::build_headers(self.api_key.expose_secret())?;
        self.transport
            .request_json(Method::GET, url, headers, None)
            .await
    }
}

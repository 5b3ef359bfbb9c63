//! xAI client construction and configuration

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

use crate::defaults;
use crate::error::AiError;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::transport::{HttpResponse, HttpTransport};

use super::utils;

/// Tuning knobs for the xAI adapter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XaiOptions {
    pub model: Option<String>,
    pub image_model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl XaiOptions {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            model: other.model.or(self.model),
            image_model: other.image_model.or(self.image_model),
            temperature: other.temperature.or(self.temperature),
            max_tokens: other.max_tokens.or(self.max_tokens),
        }
    }
}

/// xAI adapter implementing analysis and restoration capabilities
#[derive(Debug, Clone)]
pub struct XaiClient {
    pub(crate) api_key: SecretString,
    pub(crate) base_url: String,
    pub(crate) transport: HttpTransport,
    pub(crate) retry: RetryExecutor,
    pub(crate) options: XaiOptions,
}

impl XaiClient {
    /// Create a new xAI adapter
    pub fn new(api_key: impl Into<String>, options: XaiOptions) -> Result<Self, AiError> {
        Ok(Self {
            api_key: SecretString::from(api_key.into()),
            base_url: defaults::xai::BASE_URL.to_string(),
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

    pub(crate) fn model(&self) -> &str {
        self.options.model.as_deref().unwrap_or(defaults::xai::MODEL)
    }

    pub(crate) fn image_model(&self) -> &str {
        self.options
            .image_model
            .as_deref()
            .unwrap_or(defaults::xai::IMAGE_MODEL)
    }

    /// Issue one authenticated POST; passed to the retry executor as the
    /// repeatable operation.
    pub(crate) async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, AiError> {
        let headers = utils::build_headers(self.api_key.expose_secret())?;
        self.transport
            .request_json(Method::POST, url, headers, Some(body))
            .await
    }
}

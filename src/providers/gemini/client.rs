//! Gemini client construction and configuration

use reqwest::Method;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;

use crate::defaults;
use crate::error::AiError;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::transport::{HttpResponse, HttpTransport};

use super::utils;

/// Tuning knobs for the Gemini adapter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeminiOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Gemini adapter implementing the analysis capability
#[derive(Debug, Clone)]
pub struct GeminiClient {
    pub(crate) api_key: SecretString,
    pub(crate) base_url: String,
    pub(crate) transport: HttpTransport,
    pub(crate) retry: RetryExecutor,
    pub(crate) options: GeminiOptions,
}

impl GeminiClient {
    /// Create a new Gemini adapter
    pub fn new(api_key: impl Into<String>, options: GeminiOptions) -> Result<Self, AiError> {
        Ok(Self {
            api_key: SecretString::from(api_key.into()),
            base_url: defaults::gemini::BASE_URL.to_string(),
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
        self.options.model.as_deref().unwrap_or(defaults::gemini::MODEL)
    }

    /// Issue one POST; passed to the retry executor as the repeatable
    /// operation.
    pub(crate) async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, AiError> {
        self.transport
            .request_json(Method::POST, url, utils::build_headers(), Some(body))
            .await
    }
}

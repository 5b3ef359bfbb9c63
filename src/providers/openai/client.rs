//! OpenAI client construction and configuration

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

use crate::defaults;
use crate::error::AiError;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::transport::{HttpResponse, HttpTransport};

use super::utils;

/// Tuning knobs for the OpenAI adapter.
///
/// Deserialized from the credential's opaque extra-config blob; unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpenAiOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub image_size: Option<String>,
    pub image_quality: Option<String>,
}

impl OpenAiOptions {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            model: other.model.or(self.model),
            temperature: other.temperature.or(self.temperature),
            max_tokens: other.max_tokens.or(self.max_tokens),
            image_size: other.image_size.or(self.image_size),
            image_quality: other.image_quality.or(self.image_quality),
        }
    }
}

/// OpenAI adapter implementing analysis and restoration capabilities
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    pub(crate) api_key: SecretString,
    pub(crate) base_url: String,
    pub(crate) transport: HttpTransport,
    pub(crate) retry: RetryExecutor,
    pub(crate) options: OpenAiOptions,
}

impl OpenAiClient {
    /// Create a new OpenAI adapter
    pub fn new(api_key: impl Into<String>, options: OpenAiOptions) -> Result<Self, AiError> {
        Ok(Self {
            api_key: SecretString::from(api_key.into()),
            base_url: defaults::openai::BASE_URL.to_string(),
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
        self.options.model.as_deref().unwrap_or(defaults::openai::MODEL)
    }

    pub(crate) fn temperature(&self) -> f32 {
        self.options.temperature.unwrap_or(defaults::openai::TEMPERATURE)
    }

    pub(crate) fn max_tokens(&self) -> u32 {
        self.options.max_tokens.unwrap_or(defaults::openai::MAX_TOKENS)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_merge_prefers_other() {
        let explicit = OpenAiOptions {
            model: Some("gpt-4o".into()),
            temperature: Some(0.2),
            ..Default::default()
        };
        let extra = OpenAiOptions {
            model: Some("gpt-4o-mini".into()),
            image_size: Some("512x512".into()),
            ..Default::default()
        };

        let merged = explicit.merge(extra);
        assert_eq!(merged.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(merged.temperature, Some(0.2));
        assert_eq!(merged.image_size.as_deref(), Some("512x512"));
    }

    #[test]
    fn test_options_from_extra_config_blob() {
        let blob = serde_json::json!({
            "imageSize": "1792x1024",
            "imageQuality": "hd",
            "unknownKey": true
        });
        let options: OpenAiOptions = serde_json::from_value(blob).unwrap();
        assert_eq!(options.image_size.as_deref(), Some("1792x1024"));
        assert_eq!(options.image_quality.as_deref(), Some("hd"));
        assert!(options.model.is_none());
    }
}

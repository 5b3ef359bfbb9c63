//! Provider Registry
//!
//! Configuration-driven adapter selection. Given a capability, the registry
//! reads persisted credentials, picks the first usable vendor in a fixed
//! priority order, and constructs the matching adapter with merged settings
//! (explicit credential fields overlaid with the vendor-specific
//! extra-config blob).
//!
//! Selection itself is a pure function over (priority list, credential set)
//! so it stays testable without a store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AiError;
use crate::providers::gemini::{GeminiClient, GeminiOptions};
use crate::providers::meshy::{MeshyClient, MeshyOptions};
use crate::providers::openai::{OpenAiClient, OpenAiOptions};
use crate::providers::xai::{XaiClient, XaiOptions};
use crate::store::RecordStore;
use crate::traits::{AnalysisCapability, ImageRestorationCapability, ModelGenerationCapability};
use crate::types::{PromptTemplate, ProviderCredential, ServiceName};

/// Priority order for analysis providers
pub const ANALYSIS_PRIORITY: &[ServiceName] =
    &[ServiceName::OpenAi, ServiceName::Gemini, ServiceName::Grok];

/// Priority order for restoration providers (Gemini has no image generation)
pub const RESTORATION_PRIORITY: &[ServiceName] = &[ServiceName::OpenAi, ServiceName::Grok];

/// Select the first usable credential in priority order.
///
/// A credential qualifies only when it is active and carries a non-empty
/// key; priority applies among qualifying vendors, so an active-but-keyless
/// higher-priority vendor never shadows a lower-priority configured one.
pub fn select_credential<'a>(
    priority: &[ServiceName],
    credentials: &'a [ProviderCredential],
) -> Option<&'a ProviderCredential> {
    priority.iter().find_map(|service| {
        credentials
            .iter()
            .find(|credential| credential.service_name == *service && credential.is_usable())
    })
}

fn vendor_list(priority: &[ServiceName]) -> String {
    let names: Vec<&str> = priority.iter().map(ServiceName::display_name).collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
        _ => names.join(""),
    }
}

/// Parse the opaque extra-config blob into vendor options, tolerating absence
fn options_from_extra<T: serde::de::DeserializeOwned + Default>(
    credential: &ProviderCredential,
) -> Result<T, AiError> {
    match &credential.extra_config {
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            AiError::ConfigurationError(format!(
                "Invalid extra configuration for {}: {e}",
                credential.service_name
            ))
        }),
        None => Ok(T::default()),
    }
}

/// Runtime component resolving adapters from persisted configuration
#[derive(Clone)]
pub struct ProviderRegistry {
    store: Arc<dyn RecordStore>,
    base_urls: HashMap<ServiceName, String>,
}

impl ProviderRegistry {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            base_urls: HashMap::new(),
        }
    }

    /// Override a vendor's API base URL (tests, gateways)
    pub fn with_base_url(mut self, service: ServiceName, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(service, base_url.into());
        self
    }

    /// Resolve the analysis adapter for the highest-priority usable vendor.
    pub async fn resolve_analysis_provider(
        &self,
    ) -> Result<Box<dyn AnalysisCapability>, AiError> {
        let credentials = self
            .store
            .find_active_credentials(ANALYSIS_PRIORITY)
            .await?;
        let credential =
            select_credential(ANALYSIS_PRIORITY, &credentials).ok_or_else(|| {
                AiError::ConfigurationError(format!(
                    "No analysis provider is configured: an administrator must specify an API key for {}.",
                    vendor_list(ANALYSIS_PRIORITY)
                ))
            })?;

        match credential.service_name {
            ServiceName::Gemini => {
                let options = GeminiOptions {
                    model: credential.model.clone(),
                    temperature: credential.temperature,
                    max_tokens: credential.max_tokens,
                };
                let mut client = GeminiClient::new(credential.api_key.clone(), options)?;
                if let Some(url) = self.base_urls.get(&ServiceName::Gemini) {
                    client = client.with_base_url(url.clone());
                }
                Ok(Box::new(client))
            }
            ServiceName::Grok => {
                let explicit = XaiOptions {
                    model: credential.model.clone(),
                    temperature: credential.temperature,
                    max_tokens: credential.max_tokens,
                    ..Default::default()
                };
                let options = explicit.merge(options_from_extra(credential)?);
                let mut client = XaiClient::new(credential.api_key.clone(), options)?;
                if let Some(url) = self.base_urls.get(&ServiceName::Grok) {
                    client = client.with_base_url(url.clone());
                }
                Ok(Box::new(client))
            }
            _ => {
                let explicit = OpenAiOptions {
                    model: credential.model.clone(),
                    temperature: credential.temperature,
                    max_tokens: credential.max_tokens,
                    ..Default::default()
                };
                let options = explicit.merge(options_from_extra(credential)?);
                let mut client = OpenAiClient::new(credential.api_key.clone(), options)?;
                if let Some(url) = self.base_urls.get(&ServiceName::OpenAi) {
                    client = client.with_base_url(url.clone());
                }
                Ok(Box::new(client))
            }
        }
    }

    /// Resolve the restoration adapter for the highest-priority usable vendor.
    pub async fn resolve_restoration_provider(
        &self,
    ) -> Result<Box<dyn ImageRestorationCapability>, AiError> {
        let credentials = self
            .store
            .find_active_credentials(RESTORATION_PRIORITY)
            .await?;
        let credential =
            select_credential(RESTORATION_PRIORITY, &credentials).ok_or_else(|| {
                AiError::ConfigurationError(format!(
                    "No restoration provider is configured: an administrator must specify an API key for {}.",
                    vendor_list(RESTORATION_PRIORITY)
                ))
            })?;

        match credential.service_name {
            ServiceName::Grok => {
                let options: XaiOptions = options_from_extra(credential)?;
                let mut client = XaiClient::new(credential.api_key.clone(), options)?;
                if let Some(url) = self.base_urls.get(&ServiceName::Grok) {
                    client = client.with_base_url(url.clone());
                }
                Ok(Box::new(client))
            }
            _ => {
                let options: OpenAiOptions = options_from_extra(credential)?;
                let mut client = OpenAiClient::new(credential.api_key.clone(), options)?;
                if let Some(url) = self.base_urls.get(&ServiceName::OpenAi) {
                    client = client.with_base_url(url.clone());
                }
                Ok(Box::new(client))
            }
        }
    }

    /// Resolve the model generation adapter.
    ///
    /// A single vendor is supported, so this is a direct lookup by name
    /// rather than a priority scan.
    pub async fn resolve_model_generation_provider(
        &self,
    ) -> Result<Box<dyn ModelGenerationCapability>, AiError> {
        let credential = self
            .store
            .find_credential_by_name(ServiceName::Meshy)
            .await?;

        let credential = match credential {
            Some(credential) if credential.is_usable() => credential,
            _ => {
                return Err(AiError::MissingApiKey(
                    "Meshy AI is not configured. An administrator must specify an API key."
                        .to_string(),
                ));
            }
        };

        let options: MeshyOptions = options_from_extra(&credential)?;
        let mut client = MeshyClient::new(credential.api_key, options)?;
        if let Some(url) = self.base_urls.get(&ServiceName::Meshy) {
            client = client.with_base_url(url.clone());
        }
        Ok(Box::new(client))
    }

    /// Look up a prompt template by logical name.
    ///
    /// Absence is an administrator configuration fault, not a user error:
    /// the failure classifies as service-misconfigured, never as a missing
    /// resource.
    pub async fn resolve_prompt_template(&self, name: &str) -> Result<PromptTemplate, AiError> {
        self.store
            .find_template_by_name(name)
            .await?
            .ok_or_else(|| {
                AiError::ConfigurationError(format!("Prompt template \"{name}\" not found"))
            })
    }
}

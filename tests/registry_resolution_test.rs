//! Store-backed registry resolution tests

use std::sync::Arc;

use serde_json::json;

use relica::registry::ProviderRegistry;
use relica::store::MemoryRecordStore;
use relica::types::{PromptTemplate, ProviderCredential, ServiceName};
use relica::{AiError, classify};

fn credential(service: ServiceName, key: &str) -> ProviderCredential {
    ProviderCredential {
        api_key: key.to_string(),
        is_active: true,
        ..ProviderCredential::new(service)
    }
}

#[tokio::test]
async fn test_resolves_when_a_lower_priority_vendor_is_the_only_usable_one() {
    let store = Arc::new(MemoryRecordStore::new());
    // OpenAI active but keyless; Grok configured.
    store.put_credential(credential(ServiceName::OpenAi, "")).await;
    store.put_credential(credential(ServiceName::Grok, "xai-live")).await;

    let registry = ProviderRegistry::new(store);
    assert!(registry.resolve_analysis_provider().await.is_ok());
    assert!(registry.resolve_restoration_provider().await.is_ok());
}

#[tokio::test]
async fn test_no_qualifying_vendor_names_the_whole_priority_list() {
    let store = Arc::new(MemoryRecordStore::new());
    let registry = ProviderRegistry::new(store);

    let err = registry.resolve_analysis_provider().await.err().unwrap();
    let message = err.to_string();
    for vendor in ["OpenAI", "Gemini", "Grok"] {
        assert!(message.contains(vendor), "missing {vendor} in: {message}");
    }

    // Misconfiguration surfaces as service-unavailable, not user error.
    assert_eq!(classify(&err).status, 503);

    let err = registry.resolve_restoration_provider().await.err().unwrap();
    let message = err.to_string();
    assert!(message.contains("OpenAI") && message.contains("Grok"));
    assert!(!message.contains("Gemini"), "Gemini cannot restore images");
}

#[tokio::test]
async fn test_model_generation_requires_usable_meshy_credential() {
    let store = Arc::new(MemoryRecordStore::new());

    // Absent entirely
    let registry = ProviderRegistry::new(store.clone());
    let err = registry.resolve_model_generation_provider().await.err().unwrap();
    assert!(matches!(err, AiError::MissingApiKey(_)));
    assert_eq!(classify(&err).status, 503);

    // Present but inactive
    let mut inactive = credential(ServiceName::Meshy, "msy-live");
    inactive.is_active = false;
    store.put_credential(inactive).await;
    assert!(registry.resolve_model_generation_provider().await.is_err());

    // Active and keyed
    store.put_credential(credential(ServiceName::Meshy, "msy-live")).await;
    assert!(registry.resolve_model_generation_provider().await.is_ok());
}

#[tokio::test]
async fn test_invalid_extra_config_is_a_configuration_fault() {
    let store = Arc::new(MemoryRecordStore::new());
    let mut bad = credential(ServiceName::Meshy, "msy-live");
    // artStyle must be a string
    bad.extra_config = Some(json!({ "artStyle": 42 }));
    store.put_credential(bad).await;

    let registry = ProviderRegistry::new(store);
    let err = registry.resolve_model_generation_provider().await.err().unwrap();
    assert!(matches!(err, AiError::ConfigurationError(_)));
}

#[tokio::test]
async fn test_prompt_template_lookup() {
    let store = Arc::new(MemoryRecordStore::new());
    store
        .put_template(PromptTemplate::new("analysis", "Analyze: {{prompt}}"))
        .await;

    let registry = ProviderRegistry::new(store);
    let template = registry.resolve_prompt_template("analysis").await.unwrap();
    assert_eq!(template.template, "Analyze: {{prompt}}");

    let err = registry.resolve_prompt_template("restoration").await.unwrap_err();
    assert!(err.to_string().contains("Prompt template \"restoration\" not found"));
    assert_eq!(classify(&err).status, 503, "config fault, not a 404");
}

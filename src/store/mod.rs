//! Record Store Collaborator
//!
//! Narrow persistence interface the core consumes. Credentials and templates
//! are read-only from the core's perspective; artifact records accept partial
//! updates with single-record atomicity. An in-memory implementation backs
//! tests and lightweight embeddings.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AiError;
use crate::types::{
    ArtifactPatch, ArtifactRecord, PromptTemplate, ProviderCredential, ServiceName,
    default_templates,
};

/// Persistence operations the orchestration core depends on
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All active credentials for the given vendors, in no particular order
    async fn find_active_credentials(
        &self,
        services: &[ServiceName],
    ) -> Result<Vec<ProviderCredential>, AiError>;

    /// A single credential by vendor name, active or not
    async fn find_credential_by_name(
        &self,
        service: ServiceName,
    ) -> Result<Option<ProviderCredential>, AiError>;

    /// A prompt template by logical name
    async fn find_template_by_name(&self, name: &str) -> Result<Option<PromptTemplate>, AiError>;

    /// An artifact record by identifier
    async fn find_artifact(&self, id: &str) -> Result<Option<ArtifactRecord>, AiError>;

    /// Apply a partial update to an artifact record
    async fn update_artifact(&self, id: &str, patch: ArtifactPatch) -> Result<(), AiError>;
}

/// In-memory record store for tests and embedded use
#[derive(Default)]
pub struct MemoryRecordStore {
    credentials: RwLock<HashMap<ServiceName, ProviderCredential>>,
    templates: RwLock<HashMap<String, PromptTemplate>>,
    artifacts: RwLock<HashMap<String, ArtifactRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a credential record
    pub async fn put_credential(&self, credential: ProviderCredential) {
        self.credentials
            .write()
            .await
            .insert(credential.service_name, credential);
    }

    /// Insert or replace a prompt template
    pub async fn put_template(&self, template: PromptTemplate) {
        self.templates
            .write()
            .await
            .insert(template.name.clone(), template);
    }

    /// Insert or replace an artifact record
    pub async fn put_artifact(&self, artifact: ArtifactRecord) {
        self.artifacts
            .write()
            .await
            .insert(artifact.id.clone(), artifact);
    }

    /// Seed the three logical prompt templates with their default bodies
    pub async fn seed_default_templates(&self) {
        for template in default_templates() {
            self.put_template(template).await;
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_active_credentials(
        &self,
        services: &[ServiceName],
    ) -> Result<Vec<ProviderCredential>, AiError> {
        let credentials = self.credentials.read().await;
        Ok(services
            .iter()
            .filter_map(|service| credentials.get(service))
            .filter(|credential| credential.is_active)
            .cloned()
            .collect())
    }

    async fn find_credential_by_name(
        &self,
        service: ServiceName,
    ) -> Result<Option<ProviderCredential>, AiError> {
        Ok(self.credentials.read().await.get(&service).cloned())
    }

    async fn find_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PromptTemplate>, AiError> {
        Ok(self.templates.read().await.get(name).cloned())
    }

    async fn find_artifact(&self, id: &str) -> Result<Option<ArtifactRecord>, AiError> {
        Ok(self.artifacts.read().await.get(id).cloned())
    }

    async fn update_artifact(&self, id: &str, patch: ArtifactPatch) -> Result<(), AiError> {
        let mut artifacts = self.artifacts.write().await;
        let artifact = artifacts
            .get_mut(id)
            .ok_or_else(|| AiError::NotFound(format!("Artifact {id} not found")))?;

        if let Some(analysis) = patch.analysis_result {
            artifact.analysis_result = Some(analysis);
        }
        if let Some(url) = patch.restored_image_url {
            artifact.restored_image_url = Some(url);
        }
        if let Some(task_id) = patch.generation_task_id {
            artifact.generation_task_id = Some(task_id);
        }
        if let Some(status) = patch.generation_status {
            artifact.generation_status = Some(status);
        }
        if let Some(urls) = patch.model_urls {
            artifact.model_urls = Some(urls);
        }
        artifact.updated_at = Utc::now();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_active_filter() {
        let store = MemoryRecordStore::new();

        let mut active = ProviderCredential::new(ServiceName::OpenAi);
        active.is_active = true;
        active.api_key = "sk-live".into();
        store.put_credential(active).await;

        let mut inactive = ProviderCredential::new(ServiceName::Gemini);
        inactive.api_key = "AIza-test".into();
        store.put_credential(inactive).await;

        let found = store
            .find_active_credentials(&[ServiceName::OpenAi, ServiceName::Gemini])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].service_name, ServiceName::OpenAi);

        // Direct lookup ignores the active gate.
        assert!(
            store
                .find_credential_by_name(ServiceName::Gemini)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_artifact_patch_merging() {
        let store = MemoryRecordStore::new();
        store
            .put_artifact(ArtifactRecord::new("art-1").with_original_image("https://img/1.png"))
            .await;

        store
            .update_artifact(
                "art-1",
                ArtifactPatch::new().restored_image_url("https://img/restored.png"),
            )
            .await
            .unwrap();

        let artifact = store.find_artifact("art-1").await.unwrap().unwrap();
        assert_eq!(
            artifact.restored_image_url.as_deref(),
            Some("https://img/restored.png")
        );
        assert_eq!(
            artifact.original_image_url.as_deref(),
            Some("https://img/1.png"),
            "unset fields stay untouched"
        );
    }

    #[tokio::test]
    async fn test_update_missing_artifact_fails() {
        let store = MemoryRecordStore::new();
        let err = store
            .update_artifact("missing", ArtifactPatch::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_seed_default_templates() {
        let store = MemoryRecordStore::new();
        store.seed_default_templates().await;
        for name in ["analysis", "restoration", "3d_generation"] {
            assert!(
                store.find_template_by_name(name).await.unwrap().is_some(),
                "missing template {name}"
            );
        }
    }
}

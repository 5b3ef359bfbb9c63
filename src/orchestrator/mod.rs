//! Artifact Service Orchestrator
//!
//! Facade wiring the registry, prompt templates, record store and asset
//! cache into the operations the application surface calls. Every provider
//! failure is reduced to a classified `{status, message}` pair here; raw
//! errors never cross this boundary.
//!
//! Ownership checks over artifacts belong to the caller — the session
//! identity is assumed to be verified and scoped already.

use std::sync::Arc;

use tracing::{error, warn};

use crate::assets::AssetCache;
use crate::defaults;
use crate::error::{AiError, ClassifiedError, classify};
use crate::registry::ProviderRegistry;
use crate::store::RecordStore;
use crate::types::{
    AnalysisResult, ArtifactPatch, ArtifactRecord, GenerationStatus, JobState, ModelUrls,
    RestoredImage,
};

/// Input for a 3D generation request
#[derive(Debug, Clone)]
pub enum GenerationSource {
    /// Text-derived generation through the `3d_generation` template
    Prompt(String),
    /// Image-derived generation from an artifact photograph URL
    Image(String),
}

/// Application-facing orchestration service
#[derive(Clone)]
pub struct ArtifactService {
    registry: ProviderRegistry,
    store: Arc<dyn RecordStore>,
    cache: AssetCache,
}

impl ArtifactService {
    pub fn new(store: Arc<dyn RecordStore>, cache: AssetCache) -> Self {
        Self {
            registry: ProviderRegistry::new(store.clone()),
            store,
            cache,
        }
    }

    /// Build a service around a pre-configured registry (base URL overrides)
    pub fn with_registry(
        registry: ProviderRegistry,
        store: Arc<dyn RecordStore>,
        cache: AssetCache,
    ) -> Self {
        Self {
            registry,
            store,
            cache,
        }
    }

    /// Access the underlying registry (status pollers construct their own
    /// adapters from it)
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Analyze an artifact photograph and persist the structured result.
    pub async fn analyze(
        &self,
        artifact_id: &str,
        image_data: &str,
    ) -> Result<AnalysisResult, ClassifiedError> {
        self.require_artifact(artifact_id).await?;

        let analysis = self
            .run_analysis(image_data)
            .await
            .map_err(|e| self.classified("analyze", e))?;

        self.store
            .update_artifact(
                artifact_id,
                ArtifactPatch::new().analysis_result(analysis.clone()),
            )
            .await
            .map_err(|e| self.classified("analyze", e))?;

        Ok(analysis)
    }

    async fn run_analysis(&self, image_data: &str) -> Result<AnalysisResult, AiError> {
        let provider = self.registry.resolve_analysis_provider().await?;
        let template = self
            .registry
            .resolve_prompt_template(defaults::templates::ANALYSIS_NAME)
            .await?;
        provider.analyze(image_data, &template.template).await
    }

    /// Generate a restored rendition of the artifact and persist its URL.
    ///
    /// The original photograph URL is read from the artifact record and
    /// threaded into the adapter explicitly; its absence is a missing
    /// resource, reported before any provider work.
    pub async fn restore(
        &self,
        artifact_id: &str,
        prompt: &str,
    ) -> Result<RestoredImage, ClassifiedError> {
        let artifact = self.require_artifact(artifact_id).await?;
        let original_image_url = artifact.original_image_url.ok_or_else(|| {
            ClassifiedError::new(404, "Original image URL not found")
        })?;

        let restored = self
            .run_restoration(prompt, &original_image_url)
            .await
            .map_err(|e| self.classified("restore", e))?;

        self.store
            .update_artifact(
                artifact_id,
                ArtifactPatch::new().restored_image_url(restored.image_url.clone()),
            )
            .await
            .map_err(|e| self.classified("restore", e))?;

        Ok(restored)
    }

    async fn run_restoration(
        &self,
        prompt: &str,
        original_image_url: &str,
    ) -> Result<RestoredImage, AiError> {
        let provider = self.registry.resolve_restoration_provider().await?;
        let template = self
            .registry
            .resolve_prompt_template(defaults::templates::RESTORATION_NAME)
            .await?;
        provider
            .restore(prompt, &template.template, Some(original_image_url))
            .await
    }

    /// Start a 3D generation job and persist its task identifier.
    pub async fn generate_3d(
        &self,
        artifact_id: &str,
        source: GenerationSource,
    ) -> Result<String, ClassifiedError> {
        self.require_artifact(artifact_id).await?;

        let ticket = self
            .run_generation(source)
            .await
            .map_err(|e| self.classified("generate-3d", e))?;

        self.store
            .update_artifact(
                artifact_id,
                ArtifactPatch::new()
                    .generation_task_id(ticket.task_id.clone())
                    .generation_status(JobState::Pending),
            )
            .await
            .map_err(|e| self.classified("generate-3d", e))?;

        Ok(ticket.task_id)
    }

    async fn run_generation(
        &self,
        source: GenerationSource,
    ) -> Result<crate::types::GenerationTicket, AiError> {
        let provider = self.registry.resolve_model_generation_provider().await?;
        match source {
            GenerationSource::Image(image_url) => provider.generate_from_image(&image_url).await,
            GenerationSource::Prompt(prompt) => {
                let template = self
                    .registry
                    .resolve_prompt_template(defaults::templates::MODEL_GENERATION_NAME)
                    .await?;
                provider.generate(&prompt, &template.template).await
            }
        }
    }

    /// Check the artifact's generation job and persist the reported state.
    ///
    /// On success the vendor-hosted assets are pulled into the local cache;
    /// caching is best-effort and degrades to the original remote URLs.
    pub async fn check_generation_status(
        &self,
        artifact_id: &str,
    ) -> Result<GenerationStatus, ClassifiedError> {
        let artifact = self.require_artifact(artifact_id).await?;
        let task_id = artifact
            .generation_task_id
            .ok_or_else(|| ClassifiedError::new(404, "Generation task not found"))?;

        let mut status = self
            .run_status_check(&task_id)
            .await
            .map_err(|e| self.classified("generation-status", e))?;

        let mut patch = ArtifactPatch::new().generation_status(status.status);
        if status.status == JobState::Succeeded {
            if let Some(urls) = status.model_urls.take() {
                let cached = self.cache_model_urls(artifact_id, urls).await;
                patch = patch.model_urls(cached.clone());
                status.model_urls = Some(cached);
            }
        }

        self.store
            .update_artifact(artifact_id, patch)
            .await
            .map_err(|e| self.classified("generation-status", e))?;

        Ok(status)
    }

    async fn run_status_check(&self, task_id: &str) -> Result<GenerationStatus, AiError> {
        let provider = self.registry.resolve_model_generation_provider().await?;
        provider.check_status(task_id).await
    }

    /// Pull each model asset into the local cache, keeping the remote URL
    /// for anything that fails.
    async fn cache_model_urls(&self, artifact_id: &str, urls: ModelUrls) -> ModelUrls {
        let mut cached = ModelUrls::default();

        if let Some(url) = urls.glb {
            cached.glb = Some(
                self.cache_asset(artifact_id, &url, defaults::assets::GLB_FILENAME)
                    .await,
            );
        }
        if let Some(url) = urls.fbx {
            cached.fbx = Some(
                self.cache_asset(artifact_id, &url, defaults::assets::FBX_FILENAME)
                    .await,
            );
        }
        if let Some(url) = urls.thumbnail {
            cached.thumbnail = Some(
                self.cache_asset(artifact_id, &url, defaults::assets::THUMBNAIL_FILENAME)
                    .await,
            );
        }

        cached
    }

    /// Cache one asset, falling back to the original remote URL on failure.
    ///
    /// A failed cache write must never fail the surrounding operation: the
    /// remote URL still serves, just without durability.
    pub async fn cache_asset(&self, artifact_id: &str, remote_url: &str, filename: &str) -> String {
        match self.cache.cache(artifact_id, remote_url, filename).await {
            Ok(public_path) => public_path,
            Err(e) => {
                warn!(artifact_id, filename, error = %e, "asset caching failed, serving remote URL");
                remote_url.to_string()
            }
        }
    }

    async fn require_artifact(&self, artifact_id: &str) -> Result<ArtifactRecord, ClassifiedError> {
        self.store
            .find_artifact(artifact_id)
            .await
            .map_err(|e| self.classified("store", e))?
            .ok_or_else(|| ClassifiedError::new(404, "Artifact not found"))
    }

    fn classified(&self, operation: &str, err: AiError) -> ClassifiedError {
        error!(operation, error = %err, "operation failed");
        classify(&err)
    }
}

//! Capability Traits
//!
//! Each vendor adapter implements one or more of three independent capability
//! contracts. Adapters are stateless and cheap to construct; anything a call
//! needs — including the original image URL for restoration — is threaded
//! through as an explicit parameter, never carried in adapter instance state.

use async_trait::async_trait;

use crate::error::AiError;
use crate::types::{AnalysisResult, GenerationStatus, GenerationTicket, RestoredImage};

/// Structured analysis of an artifact photograph
#[async_trait]
pub trait AnalysisCapability: Send + Sync {
    /// Analyze an inline image.
    ///
    /// `image_data` must be a `data:<mime>;base64,<data>` URL; adapters fail
    /// with a format error before any network call otherwise. The prompt
    /// template body is sent to the vendor as-is.
    async fn analyze(
        &self,
        image_data: &str,
        prompt_template: &str,
    ) -> Result<AnalysisResult, AiError>;
}

/// AI-assisted restoration imagery
#[async_trait]
pub trait ImageRestorationCapability: Send + Sync {
    /// Generate a restored rendition of the artifact.
    ///
    /// `original_image_url` grounds the generation in the actual artifact for
    /// vendors whose image models only accept text; adapters that need it
    /// fail with a precondition error when it is absent.
    async fn restore(
        &self,
        prompt: &str,
        prompt_template: &str,
        original_image_url: Option<&str>,
    ) -> Result<RestoredImage, AiError>;
}

/// 3D model generation with asynchronous job tracking
#[async_trait]
pub trait ModelGenerationCapability: Send + Sync {
    /// Start a text-to-3D job; returns the vendor's task identifier.
    async fn generate(
        &self,
        prompt: &str,
        prompt_template: &str,
    ) -> Result<GenerationTicket, AiError>;

    /// Start an image-to-3D job.
    ///
    /// The returned identifier carries a marker so a later status check can
    /// route to the right vendor sub-endpoint.
    async fn generate_from_image(&self, image_url: &str) -> Result<GenerationTicket, AiError>;

    /// Fetch the current state of a generation job.
    async fn check_status(&self, task_id: &str) -> Result<GenerationStatus, AiError>;
}

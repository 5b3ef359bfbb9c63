//! Core Domain Types
//!
//! Value objects exchanged between adapters, the registry, the orchestrator
//! and the record store. Serialized field names match the persisted artifact
//! record (camelCase), so analysis results and model URLs round-trip through
//! the store without a translation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Structured analysis of an artifact photograph.
///
/// Produced exactly once per analysis call and immutable once returned; each
/// new analysis overwrites the previously stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub period: String,
    pub culture: String,
    pub material: String,
    pub purpose: String,
    pub dimensions: Dimensions,
    #[serde(rename = "shapeProfile")]
    pub shape_profile: ShapeProfile,
    pub condition: String,
    /// Restoration recommendations, free text
    pub restoration: String,
    /// Detailed description, free text
    pub description: String,
}

/// Estimated artifact dimensions in centimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub height: f64,
    pub base_width: f64,
    pub top_width: f64,
}

/// Silhouette profile of the artifact body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeProfile {
    Convex,
    Linear,
    Concave,
}

/// Result of an image restoration call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoredImage {
    /// URL-shaped result: either a remote URL or a `data:` URL for inline
    /// base64 payloads
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// Handle for a long-running generation job issued by a vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTicket {
    pub task_id: String,
}

/// Vendor-controlled lifecycle of a generation job.
///
/// `PENDING -> IN_PROGRESS -> {SUCCEEDED | FAILED}`; there is no transition
/// out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Pending,
    InProgress,
    Succeeded,
    Failed,
}

impl JobState {
    /// Whether no further transition can occur
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download locations for generated model assets.
///
/// Present only on a `SUCCEEDED` job; this is the only state from which the
/// asset cache may be invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbx: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ModelUrls {
    pub fn is_empty(&self) -> bool {
        self.glb.is_none() && self.fbx.is_none() && self.thumbnail.is_none()
    }
}

/// Snapshot of a generation job as reported by the vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatus {
    pub status: JobState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_urls: Option<ModelUrls>,
    /// Completion percentage, 0-100, while in progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
}

/// The fixed set of supported vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    OpenAi,
    Gemini,
    Grok,
    Meshy,
}

impl ServiceName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Grok => "grok",
            Self::Meshy => "meshy",
        }
    }

    /// Human-readable vendor name for configuration fault messages
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Grok => "Grok",
            Self::Meshy => "Meshy AI",
        }
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted per-vendor credential and tuning record.
///
/// Mutated only through admin configuration; the core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredential {
    pub service_name: ServiceName,
    /// Empty string means "unconfigured"
    pub api_key: String,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Opaque structured payload interpreted per-vendor
    pub extra_config: Option<serde_json::Value>,
    pub is_active: bool,
}

impl ProviderCredential {
    /// Create an inactive, keyless credential for a vendor
    pub fn new(service_name: ServiceName) -> Self {
        Self {
            service_name,
            api_key: String::new(),
            model: None,
            temperature: None,
            max_tokens: None,
            extra_config: None,
            is_active: false,
        }
    }

    /// A credential is usable only when it is active and carries a key.
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.api_key.is_empty()
    }
}

/// Persisted prompt template, keyed by logical name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub name: String,
    /// Template body containing a `{{prompt}}` placeholder
    pub template: String,
    pub description: Option<String>,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            description: None,
        }
    }

    /// Substitute the `{{prompt}}` placeholder with user-supplied text
    pub fn render(&self, prompt: &str) -> String {
        self.template.replace("{{prompt}}", prompt)
    }
}

/// Persisted artifact record as seen by the orchestration core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub id: String,
    pub original_image_url: Option<String>,
    pub analysis_result: Option<AnalysisResult>,
    pub restored_image_url: Option<String>,
    pub generation_task_id: Option<String>,
    pub generation_status: Option<JobState>,
    pub model_urls: Option<ModelUrls>,
    pub updated_at: DateTime<Utc>,
}

impl ArtifactRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_image_url: None,
            analysis_result: None,
            restored_image_url: None,
            generation_task_id: None,
            generation_status: None,
            model_urls: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_original_image(mut self, url: impl Into<String>) -> Self {
        self.original_image_url = Some(url.into());
        self
    }
}

/// Partial update applied to an artifact record.
///
/// Unset fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_status: Option<JobState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_urls: Option<ModelUrls>,
}

impl ArtifactPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analysis_result(mut self, result: AnalysisResult) -> Self {
        self.analysis_result = Some(result);
        self
    }

    pub fn restored_image_url(mut self, url: impl Into<String>) -> Self {
        self.restored_image_url = Some(url.into());
        self
    }

    pub fn generation_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.generation_task_id = Some(task_id.into());
        self
    }

    pub fn generation_status(mut self, status: JobState) -> Self {
        self.generation_status = Some(status);
        self
    }

    pub fn model_urls(mut self, urls: ModelUrls) -> Self {
        self.model_urls = Some(urls);
        self
    }
}

/// Seed templates for the three logical template names
pub fn default_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate::new(defaults::templates::ANALYSIS_NAME, defaults::templates::ANALYSIS),
        PromptTemplate::new(
            defaults::templates::RESTORATION_NAME,
            defaults::templates::RESTORATION,
        ),
        PromptTemplate::new(
            defaults::templates::MODEL_GENERATION_NAME,
            defaults::templates::MODEL_GENERATION,
        ),
    ]
}

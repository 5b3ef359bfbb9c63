//! # Relica - Multi-Provider AI Orchestration for Artifact Restoration
//!
//! Relica turns a photograph of an archaeological artifact into a structured
//! analysis, an AI-restored rendition, and optionally a 3D model — by
//! orchestrating interchangeable AI vendors behind three small capability
//! traits.
//!
#![deny(unsafe_code)]
//!
//! ## Architecture
//!
//! - **Capability separation**: analysis, image restoration and 3D model
//!   generation are independent traits with one adapter per vendor.
//! - **Configuration-driven selection**: a registry reads persisted
//!   credentials and picks the first active, keyed vendor in a fixed
//!   priority order at call time; adapters are stateless and cheap to
//!   construct per request.
//! - **Normalized errors**: vendors nest failures differently; adapters
//!   reduce each envelope to a message, and a single classifier maps
//!   messages onto HTTP-style statuses with user-safe wording.
//! - **Bounded patience**: transient faults are retried with exponential
//!   backoff, long-running generation jobs are polled through an explicit
//!   state machine, and vendor-hosted binaries are cached locally once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use relica::assets::AssetCache;
//! use relica::orchestrator::ArtifactService;
//! use relica::store::MemoryRecordStore;
//! use relica::types::{ArtifactRecord, ProviderCredential, ServiceName};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryRecordStore::new());
//!     store.seed_default_templates().await;
//!
//!     let mut credential = ProviderCredential::new(ServiceName::OpenAi);
//!     credential.api_key = std::env::var("OPENAI_API_KEY")?;
//!     credential.is_active = true;
//!     store.put_credential(credential).await;
//!
//!     store.put_artifact(ArtifactRecord::new("art-1")).await;
//!
//!     let service = ArtifactService::new(store, AssetCache::new("uploads/models")?);
//!     let analysis = service.analyze("art-1", "data:image/png;base64,...").await?;
//!     println!("{} ({})", analysis.artifact_type, analysis.period);
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod defaults;
pub mod error;
pub mod observability;
pub mod orchestrator;
pub mod poller;
pub mod providers;
pub mod registry;
pub mod retry;
pub mod store;
pub mod traits;
pub mod transport;
pub mod types;
pub mod utils;

// Re-exports for the common surface
pub use error::{AiError, ClassifiedError, classify};
pub use orchestrator::{ArtifactService, GenerationSource};
pub use registry::ProviderRegistry;
pub use retry::{RetryExecutor, RetryPolicy};
pub use traits::{AnalysisCapability, ImageRestorationCapability, ModelGenerationCapability};

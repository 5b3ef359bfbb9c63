//! Default Configuration Values
//!
//! Centralizes the default values used throughout the crate. Having them in
//! one place makes them easier to maintain, document, and adjust.

use std::time::Duration;

/// HTTP transport defaults
pub mod http {
    use super::*;

    /// Deadline for JSON API calls.
    ///
    /// Vendor chat/generation endpoints usually answer within a few seconds;
    /// 30 seconds covers slow vision models plus network latency.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Deadline for binary asset downloads (meshes can reach tens of MB).
    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

    /// Deadline for establishing a connection.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum number of redirects followed on binary downloads.
    pub const MAX_REDIRECTS: usize = 10;

    /// Default User-Agent string for outbound requests.
    pub const USER_AGENT: &str = concat!("relica/", env!("CARGO_PKG_VERSION"));
}

/// Retry policy defaults
pub mod retry {
    use super::*;

    /// Retries after the initial attempt.
    pub const MAX_RETRIES: u32 = 2;

    /// Wait before the first retry.
    pub const INITIAL_DELAY: Duration = Duration::from_millis(1500);

    /// Multiplier applied to the wait per attempt.
    pub const BACKOFF_MULTIPLIER: f64 = 2.0;
}

/// Generation-job polling defaults
pub mod polling {
    use super::*;

    /// Interval between status checks.
    pub const INTERVAL: Duration = Duration::from_secs(5);

    /// Attempt ceiling; together with [`INTERVAL`] this is a 5-minute cap.
    pub const MAX_ATTEMPTS: u32 = 60;
}

/// OpenAI defaults
pub mod openai {
    pub const BASE_URL: &str = "https://api.openai.com/v1";
    pub const MODEL: &str = "gpt-4o";
    pub const IMAGE_MODEL: &str = "dall-e-3";
    pub const IMAGE_SIZE: &str = "1024x1024";
    pub const IMAGE_QUALITY: &str = "standard";
    pub const TEMPERATURE: f32 = 0.7;
    pub const MAX_TOKENS: u32 = 2000;

    /// Token cap for the stage-one vision description used to ground
    /// image generation.
    pub const DESCRIPTION_MAX_TOKENS: u32 = 500;
}

/// Google Gemini defaults
pub mod gemini {
    pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const MODEL: &str = "gemini-2.0-flash";
    pub const TEMPERATURE: f32 = 0.7;
    pub const MAX_TOKENS: u32 = 2000;
}

/// xAI Grok defaults
pub mod xai {
    pub const BASE_URL: &str = "https://api.x.ai/v1";
    pub const MODEL: &str = "grok-2-vision-latest";
    pub const IMAGE_MODEL: &str = "grok-2-image";
    pub const TEMPERATURE: f32 = 0.7;
    pub const MAX_TOKENS: u32 = 2000;
}

/// Meshy defaults
pub mod meshy {
    pub const BASE_URL: &str = "https://api.meshy.ai";
    pub const ART_STYLE: &str = "realistic";
    pub const NEGATIVE_PROMPT: &str = "low quality, blurry, distorted";
}

/// Asset cache and serving defaults
pub mod assets {
    /// Public path prefix cached models are served under.
    pub const PUBLIC_PATH_PREFIX: &str = "/api/models";

    /// Hostname suffix binary asset fetches are restricted to.
    pub const ALLOWED_ASSET_HOST: &str = "meshy.ai";

    /// Canonical filenames for cached generation output.
    pub const GLB_FILENAME: &str = "model.glb";
    pub const FBX_FILENAME: &str = "model.fbx";
    pub const THUMBNAIL_FILENAME: &str = "thumbnail.png";
}

/// Logical template names and seed bodies for the prompt-template store.
///
/// The core only reads templates; these bodies let an embedding application
/// seed its store with working defaults.
pub mod templates {
    pub const ANALYSIS_NAME: &str = "analysis";
    pub const RESTORATION_NAME: &str = "restoration";
    pub const MODEL_GENERATION_NAME: &str = "3d_generation";

    pub const ANALYSIS: &str = r#"Analyze this artifact. Answer STRICTLY as JSON without markdown:
{
  "type": "artifact type (amphora, vase, ...)",
  "period": "historical period",
  "culture": "culture",
  "material": "material",
  "purpose": "purpose",
  "dimensions": {
    "height": number_in_cm,
    "baseWidth": number_in_cm,
    "topWidth": number_in_cm
  },
  "shapeProfile": "convex or linear or concave",
  "condition": "condition",
  "restoration": "restoration recommendations",
  "description": "detailed description"
}"#;

    pub const RESTORATION: &str = "Professional archaeological restoration: {{prompt}}, completely restored, JUST the artifact ALONE on solid white background #FFFFFF, nothing else in frame, object only, centered, professional product shot, NO hands.";

    pub const MODEL_GENERATION: &str =
        "{{prompt}}, ancient artifact, museum quality, highly detailed, realistic";
}

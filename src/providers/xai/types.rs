//! xAI wire types
//!
//! Grok's chat and image APIs are OpenAI-shaped; only the subset consumed
//! here is modeled.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationResponse {
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    /// Remote URL variant
    #[serde(default)]
    pub url: Option<String>,
    /// Inline base64 variant
    #[serde(default)]
    pub b64_json: Option<String>,
}

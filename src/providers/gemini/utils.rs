//! Gemini utility functions

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use super::types::GeminiError;
use crate::error::AiError;

/// Build HTTP headers for Gemini API requests.
///
/// Gemini authenticates through a `key` query parameter, so only the content
/// type goes into headers.
pub fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Map a Gemini error envelope to a domain error.
///
/// Well-known codes are annotated so downstream classification lands in the
/// right category: 429 is a quota exhaustion (the free tier resets daily),
/// 401/403 a key problem. Everything else passes through with the vendor's
/// message.
pub fn map_gemini_error(envelope: &Value, http_status: u16) -> AiError {
    let error: GeminiError = serde_json::from_value(envelope.clone()).unwrap_or(GeminiError {
        code: None,
        message: None,
        status: None,
    });

    match error.code.unwrap_or(http_status) {
        429 => AiError::QuotaExceededError(
            "Gemini daily quota exhausted. Wait for the daily reset or enable billing in Google Cloud Console."
                .to_string(),
        ),
        401 | 403 => AiError::AuthenticationError(
            "Gemini API key not valid or blocked. Check the key in the admin settings.".to_string(),
        ),
        code => AiError::ProviderError {
            provider: "gemini".to_string(),
            message: error
                .message
                .unwrap_or_else(|| format!("Gemini API error: {code}")),
            error_code: error.status,
        },
    }
}

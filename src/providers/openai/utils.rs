//! OpenAI utility functions

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::AiError;

/// Build HTTP headers for OpenAI API requests
pub fn build_headers(api_key: &str) -> Result<HeaderMap, AiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| AiError::ConfigurationError("API key contains invalid characters".to_string()))?,
    );
    Ok(headers)
}

/// Extract a single human-readable message from an OpenAI error envelope.
///
/// The `error` field is either a bare string or an object carrying
/// `.message`.
pub fn extract_error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(envelope) => envelope
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        None => None,
    }
}

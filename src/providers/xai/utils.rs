//! xAI utility functions

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::AiError;

/// Build HTTP headers for xAI API requests
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

/// Extract a single human-readable message from an xAI error envelope.
///
/// The `error` field is a bare string or an object carrying `.message`; some
/// responses only carry a top-level `.code` string.
pub fn extract_error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(envelope) => envelope
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| body.get("code").and_then(Value::as_str).map(str::to_string)),
        None => body.get("code").and_then(Value::as_str).map(str::to_string),
    }
}

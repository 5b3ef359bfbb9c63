//! Meshy utility functions

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::AiError;
use crate::types::JobState;

/// Build HTTP headers for Meshy API requests
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

/// Extract a single human-readable message from a Meshy error body.
///
/// Meshy reports failures as a top-level `error` string or a `message`
/// field depending on the endpoint.
pub fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

/// Map a vendor status string onto the job state machine.
pub fn parse_job_state(status: &str) -> Result<JobState, AiError> {
    match status {
        "PENDING" => Ok(JobState::Pending),
        "IN_PROGRESS" => Ok(JobState::InProgress),
        "SUCCEEDED" => Ok(JobState::Succeeded),
        "FAILED" => Ok(JobState::Failed),
        other => Err(AiError::ParseError(format!(
            "Unknown Meshy task status: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_error_string() {
        let body = json!({ "error": "Invalid request" });
        assert_eq!(extract_error_message(&body).as_deref(), Some("Invalid request"));
    }

    #[test]
    fn test_extract_message_fallback() {
        let body = json!({ "message": "No available licenses" });
        assert_eq!(extract_error_message(&body).as_deref(), Some("No available licenses"));
    }

    #[test]
    fn test_parse_job_states() {
        assert_eq!(parse_job_state("PENDING").unwrap(), JobState::Pending);
        assert_eq!(parse_job_state("IN_PROGRESS").unwrap(), JobState::InProgress);
        assert_eq!(parse_job_state("SUCCEEDED").unwrap(), JobState::Succeeded);
        assert_eq!(parse_job_state("FAILED").unwrap(), JobState::Failed);
        assert!(parse_job_state("EXPLODED").is_err());
    }
}

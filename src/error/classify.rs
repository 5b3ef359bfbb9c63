//! Maps raw service errors onto HTTP-style statuses and user-facing messages
//! instead of a generic 500.
//!
//! Vendors nest their failures in wildly different envelopes; each provider's
//! `utils` module reduces those to a single message string, and this module is
//! the one place that pattern-matches on the result. Ordering is significant:
//! a message containing both "quota" and "429" must classify as 429, and
//! "unauthorized" must never fall through to the network category.

use super::AiError;

/// An error reduced to an HTTP-style status and a message safe to show users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub status: u16,
    pub message: String,
}

impl ClassifiedError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for ClassifiedError {}

const NETWORK_MESSAGE: &str = "Could not reach the AI service. Check the network connection.";
const PARSE_MESSAGE: &str = "The AI service returned an invalid response. Please try again.";
const UNKNOWN_MESSAGE: &str = "Unknown server error";

/// Classify an error into a `{status, message}` pair, first match wins.
///
/// Configuration, quota and auth messages are actionable by an administrator
/// and pass through verbatim. Network and parse failures deliberately replace
/// the vendor detail with a generic message so infrastructure internals never
/// reach the end user.
pub fn classify(error: &AiError) -> ClassifiedError {
    let message = error.to_string();
    let lower = message.to_lowercase();

    // Provider not configured (no key, disabled) or template misconfiguration:
    // an administrator problem, not a user problem.
    if lower.contains("not configured") || lower.contains("must specify") {
        return ClassifiedError::new(503, message);
    }

    if lower.contains("prompt template") && lower.contains("not found") {
        return ClassifiedError::new(503, message);
    }

    // Quota / rate limit
    if lower.contains("quota")
        || lower.contains("rate limit")
        || lower.contains("429")
        || lower.contains("too many requests")
    {
        return ClassifiedError::new(429, message);
    }

    // Invalid key / no permission / no credits
    if lower.contains("key not valid")
        || lower.contains("invalid api key")
        || lower.contains("invalid_api_key")
        || lower.contains("permission")
        || lower.contains("credits")
        || lower.contains("unauthorized")
        || lower.contains("403")
        || lower.contains("401")
    {
        return ClassifiedError::new(403, message);
    }

    // Timeout / unreachable network
    if lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connection refused")
        || lower.contains("connection error")
        || lower.contains("network unreachable")
        || lower.contains("fetch failed")
        || lower.contains("econnrefused")
        || lower.contains("etimedout")
        || lower.contains("enetunreach")
    {
        return ClassifiedError::new(502, NETWORK_MESSAGE);
    }

    // Vendor returned something we could not parse
    if lower.contains("failed to parse")
        || lower.contains("json")
        || lower.contains("unexpected token")
    {
        return ClassifiedError::new(502, PARSE_MESSAGE);
    }

    // Everything else
    if message.is_empty() {
        ClassifiedError::new(500, UNKNOWN_MESSAGE)
    } else {
        ClassifiedError::new(500, message)
    }
}

//! Error Handling Module
//!
//! Central error type for the library plus the classifier that maps raw
//! errors onto HTTP-style statuses and user-safe messages:
//! - Core error type (`AiError`) with status/retryability helpers
//! - `classify` — ordered message-pattern classification for API surfaces

mod classify;

pub use classify::{ClassifiedError, classify};

/// Unified error type for all provider, transport and orchestration failures.
///
/// Adapters preserve vendor-specific detail in the message; the classifier in
/// [`classify`] is the single place that turns these into user-facing
/// `{status, message}` pairs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AiError {
    /// API returned a non-success status code
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// API key is invalid, expired or lacks permission
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Too many requests in the current window
    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    /// Account or project quota is exhausted
    #[error("Quota exceeded: {0}")]
    QuotaExceededError(String),

    /// The system is misconfigured (inactive provider, missing template, ...)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A credential record exists but carries no usable key
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller-supplied data is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Vendor returned a shape we could not interpret
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// JSON serialization/deserialization failure
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Transport-level failure that is not a timeout or connect error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Could not establish a connection to the remote host
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The in-flight operation exceeded its deadline and was aborted
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Local filesystem failure (asset cache)
    #[error("IO error: {0}")]
    IoError(String),

    /// Vendor-specific failure with the vendor's own error code preserved
    #[error("{provider} error: {message}")]
    ProviderError {
        provider: String,
        message: String,
        error_code: Option<String>,
    },

    /// The selected provider does not support the requested operation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Catch-all for bugs and impossible states
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AiError {
    /// Create an API error with the given status code and message.
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// HTTP-style status code associated with this error, when one exists.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::AuthenticationError(_) => Some(401),
            Self::RateLimitError(_) | Self::QuotaExceededError(_) => Some(429),
            Self::NotFound(_) => Some(404),
            Self::InvalidInput(_) => Some(400),
            Self::ConfigurationError(_) | Self::MissingApiKey(_) => Some(503),
            Self::TimeoutError(_) | Self::ConnectionError(_) | Self::ParseError(_) => Some(502),
            _ => None,
        }
    }

    /// Whether a retry of the same operation could plausibly succeed.
    ///
    /// Client-class failures (bad key, bad input, missing configuration) will
    /// not self-heal; network faults and 5xx responses may.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError { code, .. } => *code >= 500,
            Self::TimeoutError(_) | Self::ConnectionError(_) | Self::HttpError(_) => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for AiError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

//! Tracing Setup
//!
//! Structured logging configuration for embedding applications. The library
//! itself only emits `tracing` events; installing a subscriber is the host's
//! choice, and this helper covers the common case.

use tracing_subscriber::EnvFilter;

use crate::error::AiError;

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive, overridable through `RUST_LOG`
    pub filter: String,
    /// Use the compact single-line formatter
    pub compact: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: format!("{}=info", env!("CARGO_PKG_NAME")),
            compact: true,
        }
    }
}

/// Install a global fmt subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), AiError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.compact {
        builder.compact().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| AiError::InternalError(format!("Failed to install tracing subscriber: {e}")))
}

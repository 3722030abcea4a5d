//! Provider error types

use thiserror::Error;

/// Errors surfaced while constructing a client. Request-time failures never
/// use this type; they are normalized into [`crate::UpstreamOutcome`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

//! Daypick Provider - Upstream model transport
//!
//! A thin adapter around the Gemini generateContent endpoint. One HTTP call
//! per invocation, every result normalized into an [`UpstreamOutcome`] so the
//! orchestrator never sees transport-level errors.

mod config;
mod error;
mod gemini;
mod outcome;
mod traits;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use gemini::GeminiClient;
pub use outcome::{classify_failure, UpstreamOutcome};
pub use secrecy::SecretString;
pub use traits::GenerateClient;

//! Model client trait

use async_trait::async_trait;

use crate::UpstreamOutcome;

/// The seam between the orchestrator and the transport. Implementations must
/// be total: any failure is reported through [`UpstreamOutcome`], never by
/// panicking or leaking transport errors.
#[async_trait]
pub trait GenerateClient: Send + Sync {
    /// Issue one generation call for `prompt` against `model`.
    async fn generate(&self, prompt: &str, model: &str) -> UpstreamOutcome;
}

//! The generation request pipeline.
//!
//! One request moves through `Validating → Configured → Requesting(primary)
//! → [Requesting(secondary) on quota] → Parsing → Filtering → Responding`
//! and always terminates in exactly one reply. Every failure branch except
//! an unknown module is absorbed here and converted into a response carrying
//! a diagnostic source tag, so callers can always render something.

use std::sync::Arc;

use daypick_core::{
    build_prompt, contains_banned, contains_banned_text, parse_model_output, pick_fallback_with,
    GenerationResponse, ModuleKind, Source,
};
use daypick_provider::{GenerateClient, UpstreamOutcome};
use thiserror::Error;

/// The only failure surfaced as a protocol-level error rather than a
/// fallback response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("unknown or missing module: {0:?}")]
    UnknownModule(String),
}

/// Terminal reply of one pipeline run.
#[derive(Debug)]
pub enum PipelineReply {
    /// A usable payload, live or fallback. HTTP 200.
    Success(GenerationResponse),
    /// Strict-mode module with an unavailable upstream. HTTP 503, no
    /// substituted data.
    StrictUnavailable { module: ModuleKind, detail: String },
}

pub struct Orchestrator {
    /// `None` when no credential is configured; requests then short-circuit
    /// to fallbacks without any outbound call.
    client: Option<Arc<dyn GenerateClient>>,
    primary_model: String,
    secondary_model: String,
}

impl Orchestrator {
    pub fn new(
        client: Option<Arc<dyn GenerateClient>>,
        primary_model: impl Into<String>,
        secondary_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            primary_model: primary_model.into(),
            secondary_model: secondary_model.into(),
        }
    }

    pub async fn handle(&self, module_key: &str) -> Result<PipelineReply, PipelineError> {
        // Validating
        let module = ModuleKind::parse(module_key)
            .ok_or_else(|| PipelineError::UnknownModule(module_key.to_string()))?;

        // Configured. A missing credential is a deployment state, not a
        // runtime error; keep it quiet.
        let Some(client) = &self.client else {
            tracing::debug!(%module, "no credential configured, serving fallback");
            return Ok(self.fallback(module, Source::FallbackNoKey));
        };

        // Requesting(primary), with the one bounded retry: quota exhaustion
        // downgrades to the secondary model exactly once. No other outcome
        // is retried.
        let prompt = build_prompt(module);
        let mut model = self.primary_model.as_str();
        let mut outcome = client.generate(&prompt, model).await;
        if outcome == UpstreamOutcome::QuotaExceeded {
            tracing::info!(
                %module,
                from = self.primary_model,
                to = self.secondary_model,
                "quota exhausted, retrying on secondary model"
            );
            model = self.secondary_model.as_str();
            outcome = client.generate(&prompt, model).await;
        }

        let text = match outcome {
            UpstreamOutcome::Ok { text } => text,
            UpstreamOutcome::QuotaExceeded => {
                tracing::warn!(%module, "quota exhausted on both model tiers");
                return Ok(self.unavailable_or_fallback(
                    module,
                    Source::FallbackApiError,
                    "quota exhausted on both model tiers".to_string(),
                ));
            }
            UpstreamOutcome::HttpError { status, body } => {
                tracing::warn!(%module, ?status, %body, "upstream http failure");
                return Ok(self.unavailable_or_fallback(
                    module,
                    Source::FallbackApiError,
                    "upstream unavailable".to_string(),
                ));
            }
            UpstreamOutcome::EmptyText => {
                tracing::warn!(%module, model, "upstream returned no text");
                return Ok(self.unavailable_or_fallback(
                    module,
                    Source::FallbackNoText,
                    "upstream returned no text".to_string(),
                ));
            }
            UpstreamOutcome::Blocked { reason } => {
                tracing::warn!(%module, %reason, "upstream blocked the prompt");
                return Ok(self.unavailable_or_fallback(
                    module,
                    Source::FallbackBlocked(reason.clone()),
                    format!("upstream blocked the prompt: {reason}"),
                ));
            }
        };

        // Parsing, preceded by the first safety pass over the raw text. A
        // hit here skips parsing entirely.
        if contains_banned_text(&text) {
            tracing::info!(%module, "raw model text hit the safety filter");
            return Ok(self.fallback(module, Source::FallbackFilteredText));
        }
        let data = parse_model_output(&text);

        // Filtering: second safety pass over the parsed structure. Parse
        // recovery can surface content the raw pass normalized differently
        // (e.g. unicode escapes).
        if contains_banned(&data) {
            tracing::info!(%module, "parsed result hit the safety filter");
            return Ok(self.fallback(module, Source::FallbackFiltered));
        }

        // Responding
        Ok(PipelineReply::Success(GenerationResponse::live(
            module, data, model,
        )))
    }

    fn fallback(&self, module: ModuleKind, source: Source) -> PipelineReply {
        let data = pick_fallback_with(module, &mut rand::thread_rng());
        PipelineReply::Success(GenerationResponse::fallback(module, data, source))
    }

    /// Strict modules surface upstream failure instead of masking it; for
    /// everyone else the failure degrades to a tagged fallback.
    fn unavailable_or_fallback(
        &self,
        module: ModuleKind,
        source: Source,
        detail: String,
    ) -> PipelineReply {
        if module.is_strict() {
            PipelineReply::StrictUnavailable { module, detail }
        } else {
            self.fallback(module, source)
        }
    }
}

//! Normalized classification of one upstream call.
//!
//! The orchestrator's branching depends entirely on this taxonomy, so the
//! mapping rules live here rather than being scattered through the client.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Quota / resource-exhaustion body patterns, checked when the status
    // alone is not conclusive.
    static ref QUOTA_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)resource[_\s]?exhausted").unwrap(),
        Regex::new(r"(?i)\bquota\b").unwrap(),
        Regex::new(r"(?i)rate[_\s]?limit").unwrap(),
        Regex::new(r"(?i)too many requests").unwrap(),
    ];
}

/// The outcome of exactly one call to the generative backend. Consumed
/// immediately by the orchestrator; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    /// 2xx with extractable candidate text.
    Ok { text: String },
    /// The current model tier's usage allowance is depleted. The only
    /// outcome the orchestrator retries, once, on the secondary model.
    QuotaExceeded,
    /// 2xx but the prompt feedback carries a block reason.
    Blocked { reason: String },
    /// Non-quota HTTP failure. `status` is `None` when the transport itself
    /// failed (timeout, DNS, connection reset).
    HttpError { status: Option<u16>, body: String },
    /// 2xx with no text in the first candidate's content parts.
    EmptyText,
}

fn is_quota_body(body: &str) -> bool {
    QUOTA_PATTERNS.iter().any(|pattern| pattern.is_match(body))
}

/// Classify a non-success HTTP response.
pub fn classify_failure(status: u16, body: &str) -> UpstreamOutcome {
    if status == 429 || is_quota_body(body) {
        return UpstreamOutcome::QuotaExceeded;
    }
    UpstreamOutcome::HttpError {
        status: Some(status),
        body: body.to_string(),
    }
}

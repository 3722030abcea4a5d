//! Response types shared between the pipeline and its HTTP surface.

use serde::ser::Serializer;
use serde::Serialize;
use serde_json::Value;

use crate::ModuleKind;

/// Provenance of a generation response. Every response carries exactly one of
/// these tags; callers rely on them to distinguish live content from each
/// fallback cause, so the strings are a stable contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Live content from the generative backend.
    Gemini,
    /// No credential configured; no outbound call was attempted.
    FallbackNoKey,
    /// Upstream returned a non-quota HTTP failure (or the transport failed).
    FallbackApiError,
    /// Upstream answered but carried no extractable text.
    FallbackNoText,
    /// Upstream blocked the prompt, with its stated reason.
    FallbackBlocked(String),
    /// Raw model text hit the safety filter before parsing.
    FallbackFilteredText,
    /// Parsed structure hit the safety filter.
    FallbackFiltered,
    /// An internal fault was converted into a best-effort fallback.
    FallbackServerError,
}

impl Source {
    pub fn tag(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::FallbackNoKey => "fallback:no-key".to_string(),
            Self::FallbackApiError => "fallback:api-error".to_string(),
            Self::FallbackNoText => "fallback:no-text".to_string(),
            Self::FallbackBlocked(reason) => format!("fallback:blocked:{reason}"),
            Self::FallbackFilteredText => "fallback:filtered-text".to_string(),
            Self::FallbackFiltered => "fallback:filtered".to_string(),
            Self::FallbackServerError => "fallback:server-error".to_string(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Gemini)
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tag())
    }
}

/// The value returned to the caller for every request that produced a usable
/// payload, live or fallback.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub module: String,
    pub data: Value,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn live(module: ModuleKind, data: Value, model: impl Into<String>) -> Self {
        Self {
            module: module.as_str().to_string(),
            data,
            source: Source::Gemini,
            model: Some(model.into()),
            error: None,
        }
    }

    pub fn fallback(module: ModuleKind, data: Value, source: Source) -> Self {
        Self {
            module: module.as_str().to_string(),
            data,
            source,
            model: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_tags_are_stable() {
        assert_eq!(Source::Gemini.tag(), "gemini");
        assert_eq!(Source::FallbackNoKey.tag(), "fallback:no-key");
        assert_eq!(Source::FallbackApiError.tag(), "fallback:api-error");
        assert_eq!(Source::FallbackNoText.tag(), "fallback:no-text");
        assert_eq!(
            Source::FallbackBlocked("SAFETY".into()).tag(),
            "fallback:blocked:SAFETY"
        );
        assert_eq!(Source::FallbackFilteredText.tag(), "fallback:filtered-text");
        assert_eq!(Source::FallbackFiltered.tag(), "fallback:filtered");
        assert_eq!(Source::FallbackServerError.tag(), "fallback:server-error");
    }

    #[test]
    fn live_response_serializes_with_model_and_no_error() {
        let response = GenerationResponse::live(
            ModuleKind::Song,
            json!({ "song": "Sprinter" }),
            "gemini-1.5-flash",
        );
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["module"], "song");
        assert_eq!(body["source"], "gemini");
        assert_eq!(body["model"], "gemini-1.5-flash");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn fallback_response_omits_model() {
        let response = GenerationResponse::fallback(
            ModuleKind::Comfort,
            json!({ "text": "ok" }),
            Source::FallbackApiError,
        );
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["source"], "fallback:api-error");
        assert!(body.get("model").is_none());
    }
}

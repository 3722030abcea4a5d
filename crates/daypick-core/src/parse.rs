//! Recovery-oriented parsing of model output.
//!
//! Models are asked for JSON-only output but still wrap it in prose or code
//! fences often enough that a strict parse alone loses data.

use serde_json::{json, Value};

/// Turn raw model output into a structured result. First success wins:
///
/// 1. strict parse of the trimmed text, if it yields an object;
/// 2. the substring from the first `{` to the last `}`, if it parses to an
///    object;
/// 3. `{"raw": <original text>}` so nothing is lost.
pub fn parse_model_output(raw: &str) -> Value {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_object() {
            return value;
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                if value.is_object() {
                    return value;
                }
            }
        }
    }

    json!({ "raw": raw })
}

//! Application-level content safety filter.
//!
//! Defense in depth on top of the upstream model's own safety settings: the
//! upstream is asked to block only high-severity content, so this list covers
//! the categories that threshold can let through. The orchestrator runs it
//! twice per request, once against the raw model text and once against the
//! parsed structure (parse recovery can copy raw text into a `raw` field).

use serde_json::Value;

/// High-severity terms: self-harm, illegal activity, drunk driving, suicide.
const BANNED_TERMS: &[&str] = &["自殘", "違法", "酒駕", "自殺"];

/// Substring match over case-normalized text.
pub fn contains_banned_text(text: &str) -> bool {
    let normalized = text.to_lowercase();
    BANNED_TERMS
        .iter()
        .any(|term| normalized.contains(&term.to_lowercase()))
}

/// Check a structured candidate by serializing it first, so banned terms are
/// caught regardless of which field they appear in.
pub fn contains_banned(candidate: &Value) -> bool {
    contains_banned_text(&candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_drunk_driving_anywhere_in_structure() {
        let candidate = json!({ "title": "今日挑戰", "text": "酒駕回家最快", "safety": "無" });
        assert!(contains_banned(&candidate));

        let nested = json!({ "data": { "inner": ["ok", "挑戰酒駕"] } });
        assert!(contains_banned(&nested));
    }

    #[test]
    fn flags_raw_text() {
        assert!(contains_banned_text("今天要不要試試自殘呢"));
        assert!(contains_banned_text("做一點違法的事"));
        assert!(contains_banned_text("自殺不能解決問題"));
    }

    #[test]
    fn clean_candidate_passes() {
        let candidate = json!({ "title": "今日挑戰", "text": "嘗試一家沒吃過的餐廳" });
        assert!(!contains_banned(&candidate));
        assert!(!contains_banned_text("walk a different route home"));
    }
}

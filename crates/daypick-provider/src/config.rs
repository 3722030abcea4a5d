//! Provider configuration

use secrecy::SecretString;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Explicit deadline per outbound call; expiry surfaces as an http-error
/// outcome instead of hanging on whatever the transport would default to.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Gemini transport. The credential is threaded in
/// explicitly; the client never reads the process environment.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub(crate) fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_gemini_with_short_deadline() {
        let config = ProviderConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ProviderConfig::new("key").with_base_url("http://localhost:9999/");
        assert_eq!(config.base_url_trimmed(), "http://localhost:9999");
    }
}

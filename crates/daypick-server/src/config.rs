//! Configuration from environment variables.
//!
//! **Environment variables:**
//! - `PORT`: server port (default: 8790)
//! - `GEMINI_API_KEY`: upstream credential; absence is a handled state
//!   (every request falls back), not a startup failure
//! - `GEMINI_MODEL`: primary model (default: gemini-1.5-flash)
//! - `GEMINI_FALLBACK_MODEL`: secondary model used once on quota exhaustion
//!   (default: gemini-1.5-flash-8b, independent quota pool)
//! - `GEMINI_BASE_URL`: upstream base URL override
//! - `REQUEST_TIMEOUT_SECS`: per-call upstream deadline (default: 10)

use secrecy::SecretString;
use std::env;

const DEFAULT_PORT: u16 = 8790;
const DEFAULT_PRIMARY_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_SECONDARY_MODEL: &str = "gemini-1.5-flash-8b";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub api_key: Option<SecretString>,
    pub primary_model: String,
    pub secondary_model: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            secondary_model: DEFAULT_SECONDARY_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            // A set-but-empty variable counts as missing.
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
            primary_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_PRIMARY_MODEL.to_string()),
            secondary_model: env::var("GEMINI_FALLBACK_MODEL")
                .unwrap_or_else(|_| DEFAULT_SECONDARY_MODEL.to_string()),
            base_url: env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_are_deployable_without_a_key() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8790);
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.primary_model, "gemini-1.5-flash");
        assert_eq!(config.secondary_model, "gemini-1.5-flash-8b");
        assert_eq!(config.request_timeout_secs, 10);
    }

    // Single env-touching test; the process environment is global, so all
    // set/remove calls stay in one place.
    #[test]
    fn from_env_respects_overrides_and_trims_blank_key() {
        env::set_var("PORT", "9000");
        env::set_var("GEMINI_API_KEY", "  secret-key  ");
        env::set_var("GEMINI_MODEL", "gemini-next");
        env::set_var("GEMINI_FALLBACK_MODEL", "gemini-next-lite");
        env::set_var("GEMINI_BASE_URL", "http://localhost:4010");
        env::set_var("REQUEST_TIMEOUT_SECS", "3");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.api_key.as_ref().unwrap().expose_secret(),
            "secret-key"
        );
        assert_eq!(config.primary_model, "gemini-next");
        assert_eq!(config.secondary_model, "gemini-next-lite");
        assert_eq!(config.base_url, "http://localhost:4010");
        assert_eq!(config.request_timeout_secs, 3);

        env::set_var("GEMINI_API_KEY", "   ");
        let config = ServerConfig::from_env();
        assert!(config.api_key.is_none());

        for var in [
            "PORT",
            "GEMINI_API_KEY",
            "GEMINI_MODEL",
            "GEMINI_FALLBACK_MODEL",
            "GEMINI_BASE_URL",
            "REQUEST_TIMEOUT_SECS",
        ] {
            env::remove_var(var);
        }
    }
}

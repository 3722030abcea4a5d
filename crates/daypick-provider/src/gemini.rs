//! Google Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{classify_failure, GenerateClient, ProviderConfig, ProviderError, UpstreamOutcome};

/// Fixed sampling temperature: daily-pick content favors variety over
/// determinism.
const TEMPERATURE: f64 = 0.8;

/// Only high-severity content is blocked upstream; moderate content is left
/// to the application-level safety filter.
const BLOCK_THRESHOLD: &str = "BLOCK_ONLY_HIGH";

const HARM_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Google Gemini API client
pub struct GeminiClient {
    client: Client,
    config: ProviderConfig,
}

impl GeminiClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(ProviderError::Configuration(
                "API key required for Gemini".into(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|category| GeminiSafetySetting {
                    category: category.to_string(),
                    threshold: BLOCK_THRESHOLD.to_string(),
                })
                .collect(),
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: TEMPERATURE,
            },
        }
    }

    fn extract_outcome(payload: GeminiResponse) -> UpstreamOutcome {
        if let Some(reason) = payload
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return UpstreamOutcome::Blocked { reason };
        }

        let text = payload
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            UpstreamOutcome::EmptyText
        } else {
            UpstreamOutcome::Ok { text }
        }
    }
}

#[async_trait]
impl GenerateClient for GeminiClient {
    async fn generate(&self, prompt: &str, model: &str) -> UpstreamOutcome {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url_trimmed(),
            model,
        );
        let request = Self::build_request(prompt);

        let response = match self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                // Timeouts, DNS failures, and resets all land here; the
                // orchestrator only ever sees a normalized outcome.
                tracing::warn!(model, error = %error, "gemini transport failure");
                return UpstreamOutcome::HttpError {
                    status: None,
                    body: error.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model, status = status.as_u16(), "gemini non-success");
            return classify_failure(status.as_u16(), &body);
        }

        match response.json::<GeminiResponse>().await {
            Ok(payload) => Self::extract_outcome(payload),
            Err(error) => UpstreamOutcome::HttpError {
                status: Some(status.as_u16()),
                body: format!("undecodable response body: {error}"),
            },
        }
    }
}

// API request/response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    safety_settings: Vec<GeminiSafetySetting>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GeminiSafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

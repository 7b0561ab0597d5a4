//! Google Gemini content generation provider.

use hulara_core::ChatRole;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::{AiError, ChatMessage, COMPLETION_TIMEOUT, SYSTEM_PROMPT};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const PRIMARY_MODEL: &str = "gemini-1.5-flash-latest";
const FALLBACK_MODEL: &str = "gemini-pro";

#[derive(Debug, Deserialize)]
struct Generation {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
///
/// Tries the flash model first and falls back to `gemini-pro` once when
/// the flash model is unavailable, as older API keys only unlock the
/// latter.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl GeminiClient {
    /// Client against the public Gemini endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: SecretString) -> Result<Self, AiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against an explicit endpoint (tests use a mock server).
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(api_key: SecretString, base_url: impl Into<String>) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Complete the conversation with one assistant reply.
    ///
    /// # Errors
    ///
    /// - [`AiError::Api`] when both models return non-2xx responses
    ///   (carrying the fallback model's response).
    /// - [`AiError::MissingContent`] when a success response has no text.
    /// - [`AiError::Http`] on network failure or timeout.
    pub async fn complete(&self, history: &[ChatMessage]) -> Result<String, AiError> {
        match self.generate(PRIMARY_MODEL, history).await {
            Err(AiError::Api { status, .. }) => {
                warn!(status, "flash model unavailable, retrying with fallback");
                self.generate(FALLBACK_MODEL, history).await
            }
            other => other,
        }
    }

    async fn generate(&self, model: &str, history: &[ChatMessage]) -> Result<String, AiError> {
        // Gemini has no system role in contents; extra system turns (the
        // product context line) ride along as user parts.
        let contents: Vec<serde_json::Value> = history
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::Assistant => "model",
                    ChatRole::System | ChatRole::User => "user",
                };
                json!({"role": role, "parts": [{"text": m.content}]})
            })
            .collect();

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{model}:generateContent",
                self.base_url
            ))
            .query(&[("key", self.api_key.expose_secret())])
            .json(&json!({
                "system_instruction": {"parts": [{"text": SYSTEM_PROMPT}]},
                "contents": contents,
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let generation: Generation =
            serde_json::from_str(&body).map_err(|_| AiError::MissingContent)?;
        generation
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(AiError::MissingContent)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let client =
            GeminiClient::with_base_url(SecretString::from("gm-secret"), "https://mock.example")
                .expect("client");
        let output = format!("{client:?}");
        assert!(!output.contains("gm-secret"));
    }
}

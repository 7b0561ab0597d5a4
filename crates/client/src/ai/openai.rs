//! OpenAI chat completions provider.

use hulara_core::ChatRole;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use super::{AiError, ChatMessage, COMPLETION_TIMEOUT, SYSTEM_PROMPT};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Client for the OpenAI chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl OpenAiClient {
    /// Client against the public OpenAI endpoint.
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
    /// - [`AiError::Api`] for a non-2xx response.
    /// - [`AiError::MissingContent`] when a success response has no text.
    /// - [`AiError::Http`] on network failure or timeout.
    pub async fn complete(&self, history: &[ChatMessage]) -> Result<String, AiError> {
        let mut messages = vec![json!({"role": "system", "content": SYSTEM_PROMPT})];
        messages.extend(history.iter().map(|m| {
            let role = match m.role {
                ChatRole::System => "system",
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            json!({"role": role, "content": m.content})
        }));

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&json!({
                "model": MODEL,
                "messages": messages,
                "max_tokens": MAX_TOKENS,
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

        let completion: Completion =
            serde_json::from_str(&body).map_err(|_| AiError::MissingContent)?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AiError::MissingContent)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

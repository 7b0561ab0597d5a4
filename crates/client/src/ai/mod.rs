//! AI chat assistant backed by a pluggable completion provider.
//!
//! The chat session owns the full conversation history and replays it on
//! every turn; providers are stateless. Provider failures never escape as
//! errors: they are rendered into the reply text so the conversation can
//! continue, mirroring how the dashboard surfaces them inline.

mod gemini;
mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use hulara_core::ChatRole;
use secrecy::SecretString;
use tracing::instrument;

use crate::config::AiProviderTag;

/// Timeout for completion calls; generation is slow.
pub(crate) const COMPLETION_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// Standing instructions sent with every completion.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for the Hulara \
    online clothing store. You help the store manager with product \
    descriptions, marketing copy, customer service replies, and general \
    e-commerce advice. Keep answers concise and practical.";

/// AI provider failure modes.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Network failure, timeout, or client construction failure.
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success status.
    #[error("AI provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// A success response carried no completion text.
    #[error("AI response contained no content")]
    MissingContent,
}

/// One turn of conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who spoke.
    pub role: ChatRole,
    /// What was said.
    pub content: String,
}

impl ChatMessage {
    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A configured completion provider.
#[derive(Debug, Clone)]
pub enum ChatProvider {
    /// OpenAI chat completions.
    OpenAi(OpenAiClient),
    /// Google Gemini content generation.
    Gemini(GeminiClient),
}

impl ChatProvider {
    /// Build the provider selected in the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the HTTP client cannot be built.
    pub fn for_tag(tag: AiProviderTag, api_key: SecretString) -> Result<Self, AiError> {
        match tag {
            AiProviderTag::Openai => Ok(Self::OpenAi(OpenAiClient::new(api_key)?)),
            AiProviderTag::Gemini => Ok(Self::Gemini(GeminiClient::new(api_key)?)),
        }
    }

    /// Provider display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "OpenAI",
            Self::Gemini(_) => "Gemini",
        }
    }

    /// Complete the conversation with one assistant reply.
    ///
    /// # Errors
    ///
    /// Returns the provider's normalized [`AiError`].
    pub async fn complete(&self, history: &[ChatMessage]) -> Result<String, AiError> {
        match self {
            Self::OpenAi(client) => client.complete(history).await,
            Self::Gemini(client) => client.complete(history).await,
        }
    }
}

/// A running conversation with the assistant.
#[derive(Debug)]
pub struct ChatSession {
    provider: ChatProvider,
    history: Vec<ChatMessage>,
    context: Option<String>,
}

impl ChatSession {
    /// Start an empty conversation on the given provider.
    #[must_use]
    pub const fn new(provider: ChatProvider) -> Self {
        Self {
            provider,
            history: Vec::new(),
            context: None,
        }
    }

    /// Set or clear an extra context line (e.g. the product currently
    /// being discussed). Sent with every completion, never stored in the
    /// history.
    pub fn set_context(&mut self, context: Option<String>) {
        self.context = context;
    }

    /// Send a user message and return the assistant's reply.
    ///
    /// Failures are rendered into the reply text (`"Error: ..."`) and
    /// recorded in the history like any other turn, so one failed call
    /// never ends the conversation.
    #[instrument(skip(self, text))]
    pub async fn send(&mut self, text: impl Into<String>) -> String {
        self.history.push(ChatMessage::user(text));

        let mut turns = Vec::with_capacity(self.history.len() + 1);
        if let Some(context) = &self.context {
            turns.push(ChatMessage {
                role: ChatRole::System,
                content: context.clone(),
            });
        }
        turns.extend(self.history.iter().cloned());

        let reply = match self.provider.complete(&turns).await {
            Ok(reply) => reply,
            Err(e) => format!("Error: {e}"),
        };
        self.history.push(ChatMessage::assistant(reply.clone()));
        reply
    }

    /// Conversation so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Drop the conversation history.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// The provider behind this session.
    #[must_use]
    pub const fn provider(&self) -> &ChatProvider {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::user("hi").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("hello").role, ChatRole::Assistant);
    }

    #[test]
    fn test_provider_name() {
        let provider =
            ChatProvider::for_tag(AiProviderTag::Openai, SecretString::from("k")).expect("provider");
        assert_eq!(provider.name(), "OpenAI");
    }

    #[test]
    fn test_session_clear_empties_history() {
        let provider =
            ChatProvider::for_tag(AiProviderTag::Gemini, SecretString::from("k")).expect("provider");
        let mut session = ChatSession::new(provider);
        session.history.push(ChatMessage::user("hi"));
        session.clear();
        assert!(session.history().is_empty());
    }
}

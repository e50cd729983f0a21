//! Language-model client for the agent pipeline
//!
//! A trait-based abstraction over chat-completion backends, with Gemini's
//! OpenAI-compatible endpoint as the production implementation. One request
//! per call; failures are surfaced, never retried.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::LlmConfig;

/// Role in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message of a chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// The reply extracted from a chat completion
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub content: String,
    /// Model identifier reported by the backend, if any
    pub model: Option<String>,
}

/// Trait for chat-completion backends
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one chat completion request and return the first choice
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply>;
}

/// Gemini client speaking the OpenAI-compatible chat completions protocol
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
}

impl GeminiClient {
    /// Create a new client
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        // Three sequential completions have to fit inside the request
        // timeout of the web layer, so each one gets a generous slice.
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("tripsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn chat(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        let request = gemini::ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .context("Chat completion request failed")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            bail!(
                "Chat completion failed with {status}: {}",
                truncate(&body, 300)
            );
        }

        let parsed: gemini::ChatCompletionResponse = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse chat completion: {}", truncate(&body, 300)))?;

        debug!(model = parsed.model.as_deref(), "Chat completion received");
        parsed
            .into_reply()
            .ok_or_else(|| anyhow!("No choices in chat completion response"))
    }
}

/// Trim provider bodies folded into error messages
fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

/// OpenAI-compatible chat completion wire structures
mod gemini {
    use serde::{Deserialize, Serialize};

    use super::{ChatMessage, ChatReply};

    #[derive(Debug, Serialize)]
    pub struct ChatCompletionRequest<'a> {
        pub model: &'a str,
        pub messages: &'a [ChatMessage],
        pub temperature: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ChatCompletionResponse {
        pub choices: Option<Vec<Choice>>,
        pub model: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Choice {
        pub message: Option<Message>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Message {
        pub content: Option<String>,
    }

    impl ChatCompletionResponse {
        /// First choice's text, if the response carried one
        pub fn into_reply(self) -> Option<ChatReply> {
            let model = self.model;
            let content = self
                .choices?
                .into_iter()
                .next()?
                .message?
                .content
                .filter(|content| !content.is_empty())?;
            Some(ChatReply { content, model })
        }
    }
}

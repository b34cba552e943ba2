//! Local-only inference client
//!
//! Speaks the chat-completions HTTP contract of a locally running
//! endpoint. Network errors are not hidden and nothing is retried
//! silently; callers must handle failures explicitly.

use crate::error::KernelError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the local inference kernel.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Base URL of the local endpoint
    pub base_url: String,
    /// Model name served by the endpoint
    pub model: String,
    /// Hard timeout on each request; expiry maps to [`KernelError::Timeout`]
    pub request_timeout: Duration,
    /// Optional upper bound on generated tokens
    pub max_tokens: Option<u32>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            request_timeout: Duration::from_secs(120),
            max_tokens: None,
        }
    }
}

/// One conversation message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role (`system`, `user`, `assistant`)
    pub role: String,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// A `user` message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    /// A `system` message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    options: ChatOptions,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Deterministic interface over the local chat-completions API.
#[derive(Debug)]
pub struct Kernel {
    config: KernelConfig,
    client: reqwest::Client,
}

impl Kernel {
    /// Build a kernel for the given endpoint configuration.
    ///
    /// # Errors
    /// Returns `KernelError::Transport` if the HTTP client cannot be
    /// constructed.
    pub fn new(config: KernelConfig) -> Result<Self, KernelError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(KernelError::Transport)?;
        tracing::debug!(base_url = %config.base_url, model = %config.model, "kernel initialized");
        Ok(Self { config, client })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Call the local model deterministically (temperature zero).
    ///
    /// The system prompt is injected ahead of `messages`. The response
    /// must carry its single best completion at
    /// `choices[0].message.content`.
    ///
    /// # Errors
    /// - `KernelError::Timeout` - the request exceeded the configured limit
    /// - `KernelError::Transport` - connection failure or non-2xx status
    /// - `KernelError::Schema` - the body was not the expected shape
    pub async fn generate(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, KernelError> {
        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::system(system_prompt));
        all.extend(messages.iter().cloned());

        let request = ChatRequest {
            model: &self.config.model,
            options: ChatOptions {
                temperature: 0.0,
                num_predict: self.config.max_tokens,
            },
            messages: all,
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        tracing::debug!(%url, model = %self.config.model, "kernel request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(classify)?
            .error_for_status()
            .map_err(classify)?;

        let body = response.text().await.map_err(classify)?;
        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|err| {
            tracing::error!(error = %err, "unexpected kernel response structure");
            KernelError::Schema(err.to_string())
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                KernelError::Schema("missing choices[0].message.content".to_string())
            })
    }
}

fn classify(err: reqwest::Error) -> KernelError {
    if err.is_timeout() {
        KernelError::Timeout
    } else {
        KernelError::Transport(err)
    }
}

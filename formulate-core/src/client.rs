//! Completion endpoint client - Groq's OpenAI-compatible chat API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::TranslatorConfig;
use crate::error::TranslateError;

/// A single prompt -> completion round trip. Each call is a fresh,
/// independent, stateless request: no streaming, no multi-turn context.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt at the given sampling temperature and return the raw
    /// completion content.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, TranslateError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Groq chat-completions client over a fixed model.
#[derive(Debug)]
pub struct GroqClient {
    api_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GroqClient {
    /// Build a client from resolved configuration. The credential must have
    /// been resolved first; an unresolved config is a startup error.
    pub fn new(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TranslateError::Config("endpoint credential not resolved".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, TranslateError> {
        let url = format!("{}/chat/completions", self.api_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            temperature,
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Endpoint { status, body });
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(TranslateError::EmptyCompletion)
    }
}

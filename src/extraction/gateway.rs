// src/extraction/gateway.rs
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::app_log;
use crate::types::response::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.05;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to reach AI gateway: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("AI gateway returned error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode AI gateway response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// One system + user exchange with a chat-completion model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Content of the first choice; empty when the model sent none.
    async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError>;
}

/// OpenAI-style `/v1/chat/completions` client with bearer auth.
pub struct ChatCompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl ChatCompletionClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::Client)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        app_log!(info, "Sending completion request to AI gateway ({})", self.model);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            app_log!(error, "AI gateway error {}: {}", status, body);
            return Err(GatewayError::Status { status, body });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(GatewayError::Decode)?;

        Ok(completion.first_content().to_string())
    }
}

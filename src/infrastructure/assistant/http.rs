//! HTTP assistant - talks to the chat backend over JSON

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::AssistantError;
use crate::domain::traits::Assistant;
use crate::infrastructure::config::AssistantConfig;

/// Chat route, relative to the configured base endpoint
const CHAT_PATH: &str = "/api/chat";

/// Assistant backed by the remote chat service
pub struct HttpAssistant {
    client: Client,
    url: String,
}

impl HttpAssistant {
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: chat_url(&config.endpoint),
        })
    }

    /// Full URL requests are posted to
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Join the base endpoint and the chat route without doubling the slash
fn chat_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), CHAT_PATH)
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// API response structure
#[derive(Deserialize, Debug)]
struct ChatResponse {
    reply: Option<serde_json::Value>,
}

#[async_trait]
impl Assistant for HttpAssistant {
    fn name(&self) -> &str {
        &self.url
    }

    async fn reply(&self, message: &str) -> Result<String, AssistantError> {
        let response = self.client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Payload(e.to_string()))?;

        match chat_response.reply {
            Some(serde_json::Value::String(reply)) => Ok(reply),
            Some(other) => Err(AssistantError::Payload(format!("reply is not a string: {}", other))),
            None => Err(AssistantError::Payload("missing reply field".to_string())),
        }
    }
}

//! Async client for an Ollama-compatible chat endpoint
//!
//! The client owns the running conversation: every request carries the
//! full message history plus the new user prompt, and every successful
//! reply is appended as an assistant message. Transport failures, non-2xx
//! statuses, and empty replies all surface as `ProtocolError` so callers
//! can degrade to "no command this turn".

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::config::BattleConfig;
use crate::core::error::{Result, SkirmishError};

/// One turn of the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// Client for the /api/chat protocol
pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
    history: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
    #[allow(dead_code)]
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[allow(dead_code)]
    #[serde(default)]
    role: String,
    content: String,
}

impl OllamaClient {
    /// Create a new client with explicit configuration
    pub fn new(url: String, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SkirmishError::ProtocolError(e.to_string()))?;
        Ok(Self {
            client,
            url,
            model,
            history: Vec::new(),
        })
    }

    /// Create a client from a battle config (URL and model may come from
    /// OLLAMA_URL / OLLAMA_MODEL via `BattleConfig::from_env`)
    pub fn from_config(config: &BattleConfig) -> Result<Self> {
        Self::new(
            config.inference_url.clone(),
            config.inference_model.clone(),
            Duration::from_secs(config.inference_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The running conversation, oldest first
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Send the full history plus one new user prompt, returning the
    /// assistant's reply text
    ///
    /// On failure the prompt is not kept in the history, so a skipped turn
    /// leaves the conversation exactly as it was.
    pub async fn chat(&mut self, prompt: &str) -> Result<String> {
        self.history.push(ChatMessage::user(prompt));

        let request = ChatRequest {
            model: &self.model,
            messages: &self.history,
            stream: false,
        };

        let outcome = self.send(&request).await;
        match outcome {
            Ok(content) => {
                self.history.push(ChatMessage::assistant(content.clone()));
                Ok(content)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }

    async fn send(&self, request: &ChatRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SkirmishError::ProtocolError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SkirmishError::ProtocolError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| SkirmishError::ProtocolError(e.to_string()))?;

        if completion.message.content.trim().is_empty() {
            return Err(SkirmishError::ProtocolError("empty response".into()));
        }

        Ok(completion.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new(
            "http://localhost:11434/api/chat".into(),
            "test-model".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.model(), "test-model");
        assert!(client.history().is_empty());
    }

    #[test]
    fn test_request_wire_shape() {
        let messages = vec![ChatMessage::user("hello")];
        let request = ChatRequest {
            model: "m",
            messages: &messages,
            stream: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "m");
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_response_wire_shape() {
        let json = r#"{
            "model": "m",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "[]"},
            "done": true
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.content, "[]");
        assert!(response.done);
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{ChatAnswer, ChatClient, LlmError};

#[derive(Clone)]
pub struct OllamaChatClient {
    base_url: String,
    model: String,
    http: Client,
}

impl OllamaChatClient {
    pub fn new(base_url: String, model: String) -> Result<Self, LlmError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|err| LlmError::Provider(err.to_string()))?;
        Ok(Self {
            base_url,
            model,
            http,
        })
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    model: Option<String>,
    message: OllamaMessage,
}

#[async_trait]
impl ChatClient for OllamaChatClient {
    async fn generate(&self, prompt: &str) -> Result<ChatAnswer, LlmError> {
        let request = OllamaChatRequest {
            model: self.model.clone(),
            messages: vec![OllamaMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| LlmError::Provider(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
            });
        }

        let body: OllamaChatResponse = response
            .json()
            .await
            .map_err(|err| LlmError::InvalidResponse(err.to_string()))?;

        Ok(ChatAnswer {
            answer: body.message.content,
            model: body.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}

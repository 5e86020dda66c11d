use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatAnswer {
    pub answer: String,
    pub model: String,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("http error: status {status}")]
    Http { status: u16 },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Boundary to the hosted language model: a prompt goes in, an answer
/// comes back. Any backend satisfying this shape is interchangeable.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ChatAnswer, LlmError>;
}

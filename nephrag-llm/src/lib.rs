mod ollama;
mod types;

pub use ollama::OllamaChatClient;
pub use types::{ChatAnswer, ChatClient, LlmError};

mod error;
mod ollama;

pub use error::EmbeddingProviderError;
pub use ollama::OllamaEmbedding;

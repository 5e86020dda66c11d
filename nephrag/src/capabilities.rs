use crate::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbeddingBackend {
    /// HTTP embedding service speaking the Ollama API.
    Ollama,
    /// Deterministic hash vectors; search quality is near-random.
    Hash,
}

/// What this process can actually do, computed once at startup from the
/// settings and passed to consumers. Replaces scattered runtime probes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub embeddings: EmbeddingBackend,
    pub llm_configured: bool,
}

impl Capabilities {
    pub fn detect(settings: &Settings) -> Self {
        let embeddings = if settings.embeddings_base_url.is_some() {
            EmbeddingBackend::Ollama
        } else {
            EmbeddingBackend::Hash
        };

        Self {
            embeddings,
            llm_configured: settings.llm_base_url.is_some(),
        }
    }
}

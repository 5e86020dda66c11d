mod capabilities;
mod config;
mod pipeline;
mod sources;

pub use capabilities::{Capabilities, EmbeddingBackend};
pub use config::Settings;
pub use pipeline::{
    QueryErrorKind, QueryFailure, QueryResponse, RagPipeline, RagPipelineBuilder,
};
pub use sources::official_sources;

pub use nephrag_core::{
    metadata_keys, Document, DocumentSource, Embedding, MetadataFilter, NephragError,
    SearchResult, SourceKind, SourceSet, VectorStore,
};
pub use nephrag_embeddings::OllamaEmbedding;
pub use nephrag_ingest::{BatchLoader, ContentCleaner, DocumentFetcher, FetcherConfig, LoadReport};
pub use nephrag_llm::{ChatAnswer, ChatClient, LlmError, OllamaChatClient};
pub use nephrag_retrieval::{HashEmbedder, InMemoryVectorStore, Indexer, Retriever, TextSplitter};

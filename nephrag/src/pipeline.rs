use std::path::Path;
use std::sync::Arc;

use nephrag_core::{Document, Embedding, NephragError, SearchResult, SourceSet};
use nephrag_embeddings::OllamaEmbedding;
use nephrag_ingest::{BatchLoader, DocumentFetcher, FetcherConfig, LoadReport};
use nephrag_llm::{ChatClient, OllamaChatClient};
use nephrag_retrieval::{HashEmbedder, InMemoryVectorStore, Indexer, Retriever, TextSplitter};

use crate::{official_sources, Capabilities, EmbeddingBackend, Settings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryErrorKind {
    RetrievalFailed,
    LlmNotConfigured,
    LlmFailed,
}

#[derive(Clone, Debug)]
pub struct QueryFailure {
    pub kind: QueryErrorKind,
    pub message: String,
}

/// Outcome of one question. Backend trouble shows up as `success:
/// false` with an error kind; it never propagates as a crash.
#[derive(Clone, Debug)]
pub struct QueryResponse {
    pub answer: String,
    pub model: String,
    pub success: bool,
    pub error: Option<QueryFailure>,
}

impl QueryResponse {
    fn failure(kind: QueryErrorKind, message: impl Into<String>, model: &str) -> Self {
        Self {
            answer: String::new(),
            model: model.to_string(),
            success: false,
            error: Some(QueryFailure {
                kind,
                message: message.into(),
            }),
        }
    }
}

pub struct RagPipeline {
    settings: Settings,
    capabilities: Capabilities,
    sources: SourceSet,
    embedder: Arc<dyn Embedding>,
    store: InMemoryVectorStore,
    chat: Option<Arc<dyn ChatClient>>,
    splitter: TextSplitter,
    loader: BatchLoader,
}

impl RagPipeline {
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder {
            settings: Settings::default(),
            sources: None,
            embedder: None,
            store: None,
            chat: None,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &InMemoryVectorStore {
        &self.store
    }

    /// Loads every configured source, chunks the cleaned documents, and
    /// indexes the chunks. Fails only when nothing at all could be
    /// loaded.
    pub async fn ingest(&self) -> Result<LoadReport, NephragError> {
        let report = if self.settings.max_concurrency > 1 {
            self.loader.load_all_concurrent(&self.sources).await?
        } else {
            self.loader.load_all(&self.sources).await?
        };

        let chunks = self.splitter.split_documents(&report.documents);
        tracing::info!(
            documents = report.documents.len(),
            chunks = chunks.len(),
            "indexing cleaned documents"
        );

        let indexer = Indexer::new(self.embedder.clone(), self.store.clone());
        indexer.add_documents(chunks).await?;
        Ok(report)
    }

    pub async fn add_documents(&self, docs: Vec<Document>) -> Result<(), NephragError> {
        let indexer = Indexer::new(self.embedder.clone(), self.store.clone());
        indexer.add_documents(docs).await?;
        Ok(())
    }

    /// Top-k retrieval over real content; synthetic fallback documents
    /// are excluded.
    pub async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>, NephragError> {
        let retriever = Retriever::new(self.embedder.clone(), self.store.clone());
        Ok(retriever.retrieve(query, k).await?)
    }

    pub async fn similarity_search_with_fallbacks(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>, NephragError> {
        let retriever = Retriever::new(self.embedder.clone(), self.store.clone());
        Ok(retriever.retrieve_with_fallbacks(query, k).await?)
    }

    pub async fn query(&self, question: &str) -> QueryResponse {
        let results = match self.similarity_search(question, self.settings.top_k).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(error = %err, "retrieval failed during query");
                return QueryResponse::failure(
                    QueryErrorKind::RetrievalFailed,
                    err.to_string(),
                    &self.settings.llm_model,
                );
            }
        };

        let Some(chat) = &self.chat else {
            return QueryResponse::failure(
                QueryErrorKind::LlmNotConfigured,
                "no LLM backend configured",
                &self.settings.llm_model,
            );
        };

        let prompt = build_prompt(question, &results);
        match chat.generate(&prompt).await {
            Ok(answer) => QueryResponse {
                answer: answer.answer,
                model: answer.model,
                success: true,
                error: None,
            },
            Err(err) => {
                tracing::warn!(error = %err, "LLM backend failed");
                QueryResponse::failure(
                    QueryErrorKind::LlmFailed,
                    err.to_string(),
                    &self.settings.llm_model,
                )
            }
        }
    }

    pub async fn save_index(&self, path: impl AsRef<Path>) -> Result<(), NephragError> {
        self.store.save(path).await?;
        Ok(())
    }

    pub async fn load_index(&mut self, path: impl AsRef<Path>) -> Result<(), NephragError> {
        self.store = InMemoryVectorStore::load(path).await?;
        Ok(())
    }
}

fn build_prompt(question: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return question.to_string();
    }

    let context: Vec<&str> = results
        .iter()
        .map(|result| result.document.content.as_str())
        .collect();
    format!(
        "Use the following documentation excerpts to answer the question.\n\n\
         {}\n\nQuestion: {question}",
        context.join("\n\n---\n\n")
    )
}

pub struct RagPipelineBuilder {
    settings: Settings,
    sources: Option<SourceSet>,
    embedder: Option<Arc<dyn Embedding>>,
    store: Option<InMemoryVectorStore>,
    chat: Option<Arc<dyn ChatClient>>,
}

impl RagPipelineBuilder {
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_sources(mut self, sources: SourceSet) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn with_embedder<E>(mut self, embedder: E) -> Self
    where
        E: Embedding + 'static,
    {
        self.embedder = Some(Arc::new(embedder));
        self
    }

    pub fn with_store(mut self, store: InMemoryVectorStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_chat_client<C>(mut self, chat: C) -> Self
    where
        C: ChatClient + 'static,
    {
        self.chat = Some(Arc::new(chat));
        self
    }

    pub fn build(self) -> Result<RagPipeline, NephragError> {
        let settings = self.settings;
        settings.validate()?;
        let capabilities = Capabilities::detect(&settings);

        let embedder: Arc<dyn Embedding> = match self.embedder {
            Some(embedder) => embedder,
            None => match (&capabilities.embeddings, &settings.embeddings_base_url) {
                (EmbeddingBackend::Ollama, Some(base_url)) => Arc::new(OllamaEmbedding::new(
                    base_url.clone(),
                    settings.embeddings_model.clone(),
                    settings.embedding_dimension,
                )),
                _ => {
                    tracing::warn!(
                        "no embedding backend configured, falling back to hash vectors \
                         with near-random search quality"
                    );
                    Arc::new(HashEmbedder::new(settings.embedding_dimension))
                }
            },
        };

        let chat: Option<Arc<dyn ChatClient>> = match self.chat {
            Some(chat) => Some(chat),
            None => match &settings.llm_base_url {
                Some(base_url) => Some(Arc::new(
                    OllamaChatClient::new(base_url.clone(), settings.llm_model.clone())
                        .map_err(|err| NephragError::LlmProvider(err.to_string()))?,
                )),
                None => None,
            },
        };

        let fetcher = DocumentFetcher::new(FetcherConfig {
            timeout: settings.fetch_timeout,
            max_retries: settings.max_retries,
            min_content_length: settings.min_content_length,
            fallback_enabled: settings.fallback_enabled,
            ..FetcherConfig::default()
        })?;
        let loader = BatchLoader::new(fetcher)
            .with_request_delay(settings.request_delay)
            .with_max_concurrency(settings.max_concurrency);

        let sources = match self.sources {
            Some(sources) => sources,
            None => official_sources()?,
        };

        let splitter = TextSplitter::new(settings.chunk_size, settings.chunk_overlap);

        Ok(RagPipeline {
            settings,
            capabilities,
            sources,
            embedder,
            store: self.store.unwrap_or_default(),
            chat,
            splitter,
            loader,
        })
    }
}

use nephrag_core::{
    metadata_keys, Embedding, MetadataFilter, SearchResult, Value, VectorStore,
};

use crate::RetrievalError;

/// Filter that hides synthetic fallback documents from search results.
pub fn exclude_fallbacks() -> MetadataFilter {
    MetadataFilter::NotEq(metadata_keys::IS_SAMPLE.to_string(), Value::Bool(true))
}

pub struct Retriever<E, S> {
    embedder: E,
    store: S,
}

impl<E, S> Retriever<E, S>
where
    E: Embedding,
    S: VectorStore,
{
    pub fn new(embedder: E, store: S) -> Self {
        Self { embedder, store }
    }

    /// Top-k search over real content. Fallback sample documents are
    /// excluded so placeholder text never grounds an answer silently.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        let filter = exclude_fallbacks();
        let embedding = self.embedder.embed_query(query).await?;
        let results = self.store.search(&embedding, top_k, Some(&filter)).await?;
        Ok(results)
    }

    pub async fn retrieve_with_fallbacks(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        let embedding = self.embedder.embed_query(query).await?;
        let results = self.store.search(&embedding, top_k, None).await?;
        Ok(results)
    }
}

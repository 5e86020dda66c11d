use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use nephrag_core::{Document, MetadataFilter, SearchResult, StoreError, VectorStore};

#[derive(Clone, Serialize, Deserialize)]
struct IndexEntry {
    document: Document,
    embedding: Vec<f32>,
}

#[derive(Default, Serialize, Deserialize)]
struct StoreInner {
    entries: Vec<IndexEntry>,
    dimension: Option<usize>,
}

/// In-memory vector index with cosine scoring. Entries are append-only;
/// the first `add` fixes the dimensionality for the store's lifetime.
/// Writers must be serialized by the caller; concurrent reads are fine.
#[derive(Clone, Default)]
pub struct InMemoryVectorStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let inner = self.inner.read().await;
        let bytes = serde_json::to_vec(&*inner)
            .map_err(|err| StoreError::Internal(Box::new(err)))?;
        tokio::fs::write(path.as_ref(), bytes)
            .await
            .map_err(|err| StoreError::Internal(Box::new(err)))?;
        Ok(())
    }

    /// A missing file yields an empty index, not an error, so first runs
    /// and cold starts share one code path.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let bytes = match tokio::fs::read(path.as_ref()).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new());
            }
            Err(err) => return Err(StoreError::Internal(Box::new(err))),
        };

        let inner: StoreInner =
            serde_json::from_slice(&bytes).map_err(|err| StoreError::Internal(Box::new(err)))?;

        tracing::info!(entries = inner.entries.len(), "loaded vector index");
        Ok(Self {
            inner: Arc::new(RwLock::new(inner)),
        })
    }
}

#[async_trait::async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, docs: Vec<Document>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for mut doc in docs {
            if doc.id.trim().is_empty() {
                return Err(StoreError::InvalidId(doc.id));
            }

            let embedding = doc
                .embedding
                .take()
                .ok_or_else(|| StoreError::MissingEmbedding(doc.id.clone()))?;

            let dimension = embedding.len();
            match inner.dimension {
                Some(expected) if expected != dimension => {
                    return Err(StoreError::DimensionMismatch {
                        expected,
                        got: dimension,
                    });
                }
                None => inner.dimension = Some(dimension),
                _ => {}
            }

            inner.entries.push(IndexEntry {
                document: doc,
                embedding,
            });
        }
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let inner = self.inner.read().await;
        let expected = inner.dimension.unwrap_or(query_embedding.len());
        if expected != query_embedding.len() {
            return Err(StoreError::DimensionMismatch {
                expected,
                got: query_embedding.len(),
            });
        }

        let mut scored = Vec::new();
        for entry in &inner.entries {
            if let Some(filter) = filter {
                if !filter.matches(&entry.document.metadata) {
                    continue;
                }
            }
            let mut score = cosine_similarity(query_embedding, &entry.embedding);
            if score.is_nan() {
                score = f32::NEG_INFINITY;
            }
            scored.push(SearchResult {
                document: entry.document.clone(),
                score,
            });
        }

        // Stable sort keeps insertion order for tied scores.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

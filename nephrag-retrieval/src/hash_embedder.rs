use async_trait::async_trait;
use sha2::{Digest, Sha256};

use nephrag_core::{Embedding, EmbeddingError};

/// Deterministic stand-in embedder for environments without a real
/// embedding model. Vectors are derived from SHA-256 digests of the
/// text, so identical inputs always map to identical vectors, but the
/// geometry carries no semantic meaning and search quality is close to
/// random.
#[derive(Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_to_vec(&self, text: &str) -> Vec<f32> {
        let mut vec = Vec::with_capacity(self.dimension);
        let mut block = 0u32;

        while vec.len() < self.dimension {
            let mut hasher = Sha256::new();
            hasher.update(block.to_le_bytes());
            hasher.update(text.as_bytes());
            let digest = hasher.finalize();

            for chunk in digest.chunks_exact(4) {
                if vec.len() == self.dimension {
                    break;
                }
                let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                vec.push((value % 10_000) as f32 / 10_000.0);
            }

            block += 1;
        }

        vec
    }
}

#[async_trait]
impl Embedding for HashEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.hash_to_vec(text)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.hash_to_vec(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

use serde_json::json;
use uuid::Uuid;

use nephrag_core::{metadata_keys, Document};

/// Character-window chunker. Overlap is clamped below the chunk size so
/// the window always advances.
#[derive(Clone, Copy, Debug)]
pub struct TextSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        if self.chunk_size == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        let chars: Vec<char> = text.chars().collect();
        let max_overlap = self.chunk_size.saturating_sub(1);
        let clamped_overlap = self.overlap.min(max_overlap);
        let step = (self.chunk_size - clamped_overlap).max(1);

        while start < chars.len() {
            let end = usize::min(start + self.chunk_size, chars.len());
            let chunk: String = chars[start..end].iter().collect();
            chunks.push(chunk);

            if end == chars.len() {
                break;
            }

            start = start.saturating_add(step);
        }

        chunks
    }

    /// Splits each document's content, carrying the parent's metadata
    /// onto every chunk plus its position.
    pub fn split_documents(&self, docs: &[Document]) -> Vec<Document> {
        let mut out = Vec::new();
        for doc in docs {
            for (index, chunk) in self.split(&doc.content).into_iter().enumerate() {
                let mut metadata = doc.metadata.clone();
                metadata.insert(metadata_keys::CHUNK_INDEX.to_string(), json!(index));
                metadata.insert(metadata_keys::PARENT_ID.to_string(), json!(doc.id));
                out.push(Document {
                    id: Uuid::new_v4().to_string(),
                    content: chunk,
                    metadata,
                    embedding: None,
                });
            }
        }
        out
    }
}

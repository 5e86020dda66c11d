use thiserror::Error;

use nephrag_core::{EmbeddingError, NephragError, StoreError};

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<RetrievalError> for NephragError {
    fn from(err: RetrievalError) -> Self {
        NephragError::Custom(err.to_string())
    }
}

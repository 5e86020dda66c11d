use std::{error::Error as StdError, fmt, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NephragError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no documents loaded from {attempted} sources")]
    NoDocuments { attempted: usize },
    #[error("fetch failed: {0}")]
    Fetch(FetchErrorKind),
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Custom(String),
}

impl From<EmbeddingError> for NephragError {
    fn from(err: EmbeddingError) -> Self {
        NephragError::Custom(err.to_string())
    }
}

impl From<StoreError> for NephragError {
    fn from(err: StoreError) -> Self {
        NephragError::Custom(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchErrorKind {
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("content too short: {length} chars (minimum {minimum})")]
    ContentTooShort { length: usize, minimum: usize },
}

impl FetchErrorKind {
    /// Transient failures are retried with backoff; permanent ones fail
    /// the source on the first attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchErrorKind::HttpStatus(status) => *status >= 500 || *status == 429,
            FetchErrorKind::Transport(_) | FetchErrorKind::Timeout => true,
            FetchErrorKind::ContentTooShort { .. } => false,
        }
    }
}

#[derive(Debug)]
pub enum EmbeddingError {
    InvalidResponse(String),
    RateLimited { retry_after: Option<Duration> },
    Timeout(Duration),
    Provider(String),
    Other(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingError::InvalidResponse(message) => {
                write!(f, "Embedding invalid response: {message}")
            }
            EmbeddingError::RateLimited { retry_after } => match retry_after {
                Some(duration) => write!(f, "Embedding rate limited (retry_after={duration:?})"),
                None => write!(f, "Embedding rate limited (retry_after=unknown)"),
            },
            EmbeddingError::Timeout(duration) => write!(f, "Embedding timeout after {duration:?}"),
            EmbeddingError::Provider(message) => write!(f, "Embedding provider error: {message}"),
            EmbeddingError::Other(error) => write!(f, "Embedding error: {error}"),
        }
    }
}

impl StdError for EmbeddingError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            EmbeddingError::Other(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid document id: {0}")]
    InvalidId(String),
    #[error("document '{0}' has no embedding")]
    MissingEmbedding(String),
    #[error("store error: {0}")]
    Internal(#[source] Box<dyn StdError + Send + Sync>),
}

mod document;
mod embedding;
mod error;
mod metadata_filter;
mod source;
mod value;
mod vector_store;

pub use document::{metadata_keys, Document};
pub use embedding::Embedding;
pub use error::{EmbeddingError, FetchErrorKind, NephragError, StoreError};
pub use metadata_filter::MetadataFilter;
pub use source::{DocumentSource, SourceKind, SourceSet, MAX_PRIORITY, MIN_PRIORITY};
pub use value::Value;
pub use vector_store::{SearchResult, VectorStore};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Value;

pub mod metadata_keys {
    pub const SOURCE_URL: &str = "source_url";
    pub const SOURCE_KIND: &str = "source_kind";
    pub const DESCRIPTION: &str = "description";
    pub const PRIORITY: &str = "priority";
    pub const FETCHED_AT: &str = "fetched_at";
    pub const CONTENT_LENGTH: &str = "content_length";
    pub const HTTP_STATUS: &str = "http_status";
    pub const CONTENT_TYPE: &str = "content_type";
    pub const TITLE: &str = "title";
    pub const IS_SAMPLE: &str = "is_sample";
    pub const FALLBACK_MODE: &str = "fallback_mode";
    pub const CHUNK_INDEX: &str = "chunk_index";
    pub const PARENT_ID: &str = "parent_id";
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: HashMap<String, Value>,
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: HashMap::new(),
            embedding: None,
        }
    }

    /// Synthetic placeholder content substituted for an unreachable source.
    pub fn is_fallback(&self) -> bool {
        self.metadata
            .get(metadata_keys::IS_SAMPLE)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn source_url(&self) -> Option<&str> {
        self.metadata
            .get(metadata_keys::SOURCE_URL)
            .and_then(Value::as_str)
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Value;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MetadataFilter {
    Eq(String, Value),
    NotEq(String, Value),
    All(Vec<MetadataFilter>),
}

impl MetadataFilter {
    pub fn matches(&self, metadata: &HashMap<String, Value>) -> bool {
        match self {
            MetadataFilter::Eq(key, value) => {
                metadata.get(key).map_or(false, |entry| entry == value)
            }
            MetadataFilter::NotEq(key, value) => {
                metadata.get(key).map_or(true, |entry| entry != value)
            }
            MetadataFilter::All(filters) => {
                filters.iter().all(|filter| filter.matches(metadata))
            }
        }
    }
}

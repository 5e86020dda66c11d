use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NephragError;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Nephio,
    OranSc,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Nephio => "nephio",
            SourceKind::OranSc => "oran_sc",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = NephragError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "nephio" => Ok(SourceKind::Nephio),
            "oran_sc" => Ok(SourceKind::OranSc),
            other => Err(NephragError::InvalidConfig(format!(
                "unknown source kind '{other}', expected 'nephio' or 'oran_sc'"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DocumentSource {
    pub url: String,
    pub kind: SourceKind,
    pub description: String,
    pub priority: u8,
    pub enabled: bool,
}

impl DocumentSource {
    /// Priority runs 1 (highest) through 5; anything else fails validation
    /// up front, before the source can reach a fetcher.
    pub fn new(
        url: impl Into<String>,
        kind: SourceKind,
        description: impl Into<String>,
        priority: u8,
    ) -> Result<Self, NephragError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(NephragError::InvalidConfig(
                "source url must not be empty".to_string(),
            ));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            return Err(NephragError::InvalidConfig(format!(
                "source priority must be in {MIN_PRIORITY}..={MAX_PRIORITY}, got {priority}"
            )));
        }

        Ok(Self {
            url,
            kind,
            description: description.into(),
            priority,
            enabled: true,
        })
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Immutable catalogue of documentation sources for one pipeline run.
/// "Mutations" return a new set, so concurrent runs never observe each
/// other's edits.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceSet {
    sources: Vec<DocumentSource>,
}

impl SourceSet {
    pub fn new(sources: Vec<DocumentSource>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentSource> {
        self.sources.iter()
    }

    /// Enabled sources in priority order (1 first), preserving catalogue
    /// order within a priority.
    pub fn enabled(&self) -> Vec<&DocumentSource> {
        let mut enabled: Vec<&DocumentSource> =
            self.sources.iter().filter(|source| source.enabled).collect();
        enabled.sort_by_key(|source| source.priority);
        enabled
    }

    pub fn with_source(mut self, source: DocumentSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn without_url(&self, url: &str) -> Self {
        let sources = self
            .sources
            .iter()
            .cloned()
            .map(|mut source| {
                if source.url == url {
                    source.enabled = false;
                }
                source
            })
            .collect();
        Self { sources }
    }
}

impl FromIterator<DocumentSource> for SourceSet {
    fn from_iter<I: IntoIterator<Item = DocumentSource>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().collect(),
        }
    }
}

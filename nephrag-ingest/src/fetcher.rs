use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::json;
use tokio::time::sleep;
use uuid::Uuid;

use nephrag_core::{
    metadata_keys, Document, DocumentSource, FetchErrorKind, NephragError, SourceKind, Value,
};

use crate::ContentCleaner;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0 nephrag/0.1";

#[derive(Clone, Debug)]
pub struct FetcherConfig {
    pub timeout: Duration,
    /// Total attempts per source, retries included.
    pub max_retries: usize,
    pub min_content_length: usize,
    pub user_agent: String,
    pub fallback_enabled: bool,
    /// First backoff interval; doubles per attempt. Shrunk in tests.
    pub backoff_base: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            min_content_length: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fallback_enabled: true,
            backoff_base: Duration::from_secs(1),
        }
    }
}

/// Result of one `fetch` call. `document` is `None` when the source was
/// disabled or every attempt failed with fallbacks turned off; `error`
/// keeps the last failure for the loader's statistics.
#[derive(Clone, Debug)]
pub struct FetchOutcome {
    pub document: Option<Document>,
    pub attempts: usize,
    pub retries: usize,
    pub skipped: bool,
    pub error: Option<FetchErrorKind>,
}

impl FetchOutcome {
    fn skipped() -> Self {
        Self {
            document: None,
            attempts: 0,
            retries: 0,
            skipped: true,
            error: None,
        }
    }

    // Loader-side value for a task whose semaphore closed under it.
    pub(crate) fn cancelled() -> Self {
        Self {
            document: None,
            attempts: 0,
            retries: 0,
            skipped: false,
            error: None,
        }
    }
}

enum FetchAttempt {
    Fetched {
        content: String,
        status: u16,
        content_type: Option<String>,
    },
    Failed(FetchErrorKind),
}

#[derive(Clone)]
pub struct DocumentFetcher {
    client: Client,
    cleaner: ContentCleaner,
    config: FetcherConfig,
}

impl DocumentFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, NephragError> {
        if config.max_retries == 0 {
            return Err(NephragError::InvalidConfig(
                "fetcher max_retries must be at least 1".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| NephragError::InvalidConfig(err.to_string()))?;

        Ok(Self {
            client,
            cleaner: ContentCleaner::new(),
            config,
        })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub async fn fetch(&self, source: &DocumentSource) -> FetchOutcome {
        if !source.enabled {
            tracing::debug!(url = %source.url, "skipping disabled source");
            return FetchOutcome::skipped();
        }

        let mut attempts = 0usize;
        let mut last_error: Option<FetchErrorKind> = None;

        while attempts < self.config.max_retries {
            let attempt_index = attempts as u32;
            attempts += 1;

            let failure = match self.attempt(source).await {
                FetchAttempt::Fetched {
                    content,
                    status,
                    content_type,
                } => {
                    if let Some(content_type) = content_type.as_deref() {
                        if !content_type.contains("html") {
                            tracing::warn!(
                                url = %source.url,
                                content_type = %content_type,
                                "unexpected content type, cleaning anyway"
                            );
                        }
                    }

                    let cleaned = self.cleaner.clean(&content, source.kind);
                    if cleaned.len() >= self.config.min_content_length {
                        tracing::info!(
                            url = %source.url,
                            chars = cleaned.len(),
                            attempts,
                            "loaded document"
                        );
                        return FetchOutcome {
                            document: Some(self.document_from(source, cleaned, status, content_type)),
                            attempts,
                            retries: attempts - 1,
                            skipped: false,
                            error: None,
                        };
                    }

                    FetchErrorKind::ContentTooShort {
                        length: cleaned.len(),
                        minimum: self.config.min_content_length,
                    }
                }
                FetchAttempt::Failed(kind) => kind,
            };

            let retry = failure.is_transient() && attempts < self.config.max_retries;
            tracing::warn!(url = %source.url, error = %failure, attempts, retry, "fetch attempt failed");
            last_error = Some(failure);

            if !retry {
                break;
            }
            sleep(self.config.backoff_base * 2u32.pow(attempt_index)).await;
        }

        let document = if self.config.fallback_enabled {
            tracing::warn!(url = %source.url, "substituting sample fallback document");
            Some(fallback_document(source))
        } else {
            None
        };

        FetchOutcome {
            document,
            attempts,
            retries: attempts.saturating_sub(1),
            skipped: false,
            error: last_error,
        }
    }

    async fn attempt(&self, source: &DocumentSource) -> FetchAttempt {
        let response = match self.client.get(&source.url).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => return FetchAttempt::Failed(FetchErrorKind::Timeout),
            Err(err) => return FetchAttempt::Failed(FetchErrorKind::Transport(err.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchAttempt::Failed(FetchErrorKind::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match response.text().await {
            Ok(content) => FetchAttempt::Fetched {
                content,
                status: status.as_u16(),
                content_type,
            },
            Err(err) if err.is_timeout() => FetchAttempt::Failed(FetchErrorKind::Timeout),
            Err(err) => FetchAttempt::Failed(FetchErrorKind::Transport(err.to_string())),
        }
    }

    fn document_from(
        &self,
        source: &DocumentSource,
        content: String,
        status: u16,
        content_type: Option<String>,
    ) -> Document {
        let mut metadata = source_metadata(source);
        metadata.insert(
            metadata_keys::CONTENT_LENGTH.to_string(),
            json!(content.len()),
        );
        metadata.insert(metadata_keys::HTTP_STATUS.to_string(), json!(status));
        if let Some(content_type) = content_type {
            metadata.insert(metadata_keys::CONTENT_TYPE.to_string(), json!(content_type));
        }

        Document {
            id: Uuid::new_v4().to_string(),
            content,
            metadata,
            embedding: None,
        }
    }
}

fn source_metadata(source: &DocumentSource) -> HashMap<String, Value> {
    let mut metadata = HashMap::new();
    metadata.insert(metadata_keys::SOURCE_URL.to_string(), json!(source.url));
    metadata.insert(
        metadata_keys::SOURCE_KIND.to_string(),
        json!(source.kind.as_str()),
    );
    metadata.insert(
        metadata_keys::DESCRIPTION.to_string(),
        json!(source.description),
    );
    metadata.insert(metadata_keys::PRIORITY.to_string(), json!(source.priority));
    metadata.insert(
        metadata_keys::FETCHED_AT.to_string(),
        json!(Utc::now().to_rfc3339()),
    );
    metadata
}

fn fallback_document(source: &DocumentSource) -> Document {
    let body = match source.kind {
        SourceKind::Nephio => {
            "Nephio is a Kubernetes-based, intent-driven automation platform for \
             deploying and managing network functions across edge and core clouds. \
             Configuration is expressed as declarative packages reconciled through \
             GitOps workflows, so large fleets of clusters converge on the desired \
             state without per-cluster scripting."
        }
        SourceKind::OranSc => {
            "The O-RAN Software Community builds open source software for the radio \
             access network in alignment with O-RAN Alliance specifications, \
             including the near-real-time RIC, the non-real-time RIC, and O-Cloud \
             infrastructure components used to assemble disaggregated RAN \
             deployments."
        }
    };

    let content = format!(
        "{body}\n\nThis placeholder stands in for '{}' ({}), which could not be \
         retrieved.",
        source.description, source.url
    );
    let content_length = content.len();

    let mut metadata = source_metadata(source);
    metadata.insert(
        metadata_keys::TITLE.to_string(),
        json!(format!("Sample: {}", source.description)),
    );
    metadata.insert(metadata_keys::IS_SAMPLE.to_string(), json!(true));
    metadata.insert(metadata_keys::FALLBACK_MODE.to_string(), json!(true));
    metadata.insert(
        metadata_keys::CONTENT_LENGTH.to_string(),
        json!(content_length),
    );

    Document {
        id: Uuid::new_v4().to_string(),
        content,
        metadata,
        embedding: None,
    }
}

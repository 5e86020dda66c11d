use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use nephrag_core::NephragError;

/// Tuning knobs for one pipeline run, read once from the environment and
/// validated before any network activity starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub llm_base_url: Option<String>,
    pub llm_model: String,
    pub embeddings_base_url: Option<String>,
    pub embeddings_model: String,
    pub embedding_dimension: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub fetch_timeout: Duration,
    pub max_retries: usize,
    pub max_concurrency: usize,
    pub min_content_length: usize,
    pub request_delay: Duration,
    pub fallback_enabled: bool,
    pub top_k: usize,
    pub index_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_base_url: None,
            llm_model: "llama3.1".to_string(),
            embeddings_base_url: None,
            embeddings_model: "nomic-embed-text".to_string(),
            embedding_dimension: 384,
            chunk_size: 1000,
            chunk_overlap: 100,
            fetch_timeout: Duration::from_secs(30),
            max_retries: 3,
            max_concurrency: 5,
            min_content_length: 100,
            request_delay: Duration::from_millis(500),
            fallback_enabled: true,
            top_k: 5,
            index_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, NephragError> {
        dotenvy::dotenv().ok();

        let defaults = Settings::default();
        let settings = Settings {
            llm_base_url: env_opt("NEPHRAG_LLM_BASE_URL"),
            llm_model: env_or("NEPHRAG_LLM_MODEL", &defaults.llm_model),
            embeddings_base_url: env_opt("NEPHRAG_EMBEDDINGS_BASE_URL"),
            embeddings_model: env_or("NEPHRAG_EMBEDDINGS_MODEL", &defaults.embeddings_model),
            embedding_dimension: env_parse(
                "NEPHRAG_EMBEDDING_DIMENSION",
                defaults.embedding_dimension,
            )?,
            chunk_size: env_parse("NEPHRAG_CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: env_parse("NEPHRAG_CHUNK_OVERLAP", defaults.chunk_overlap)?,
            fetch_timeout: Duration::from_secs(env_parse(
                "NEPHRAG_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            max_retries: env_parse("NEPHRAG_MAX_RETRIES", defaults.max_retries)?,
            max_concurrency: env_parse("NEPHRAG_MAX_CONCURRENCY", defaults.max_concurrency)?,
            min_content_length: env_parse(
                "NEPHRAG_MIN_CONTENT_LENGTH",
                defaults.min_content_length,
            )?,
            request_delay: Duration::from_millis(env_parse(
                "NEPHRAG_REQUEST_DELAY_MS",
                defaults.request_delay.as_millis() as u64,
            )?),
            fallback_enabled: env_parse("NEPHRAG_FALLBACK_ENABLED", defaults.fallback_enabled)?,
            top_k: env_parse("NEPHRAG_TOP_K", defaults.top_k)?,
            index_path: env_opt("NEPHRAG_INDEX_PATH").map(PathBuf::from),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), NephragError> {
        if self.chunk_size == 0 {
            return Err(NephragError::InvalidConfig(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(NephragError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.embedding_dimension == 0 {
            return Err(NephragError::InvalidConfig(
                "embedding_dimension must be greater than 0".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(NephragError::InvalidConfig(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(NephragError::InvalidConfig(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.top_k == 0 {
            return Err(NephragError::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }
        if self.llm_base_url.is_some() && self.llm_model.trim().is_empty() {
            return Err(NephragError::InvalidConfig(
                "llm_model is required when llm_base_url is set".to_string(),
            ));
        }
        if self.embeddings_base_url.is_some() && self.embeddings_model.trim().is_empty() {
            return Err(NephragError::InvalidConfig(
                "embeddings_model is required when embeddings_base_url is set".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> Result<T, NephragError>
where
    T: FromStr,
    T::Err: Display,
{
    match env_opt(key) {
        Some(raw) => raw.parse().map_err(|err| {
            NephragError::InvalidConfig(format!("{key} has an invalid value '{raw}': {err}"))
        }),
        None => Ok(default),
    }
}

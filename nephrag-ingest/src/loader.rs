use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::sleep;

use nephrag_core::{Document, NephragError, SourceSet};

use crate::fetcher::{DocumentFetcher, FetchOutcome};

const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Aggregate statistics for one batch run. Accumulated by a single
/// writer after all fetches complete, so counts never lose updates.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    pub documents: Vec<Document>,
    pub attempted: usize,
    pub succeeded: usize,
    pub fallbacks: usize,
    pub failed: usize,
    pub skipped: usize,
    pub retries: usize,
}

impl LoadReport {
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.attempted as f64
    }

    fn absorb(&mut self, outcome: FetchOutcome) {
        if outcome.skipped {
            self.skipped += 1;
            return;
        }

        self.attempted += 1;
        self.retries += outcome.retries;

        match outcome.document {
            Some(document) if document.is_fallback() => {
                self.fallbacks += 1;
                self.documents.push(document);
            }
            Some(document) => {
                self.succeeded += 1;
                self.documents.push(document);
            }
            None => self.failed += 1,
        }
    }
}

pub struct BatchLoader {
    fetcher: DocumentFetcher,
    request_delay: Duration,
    max_concurrency: usize,
}

impl BatchLoader {
    pub fn new(fetcher: DocumentFetcher) -> Self {
        Self {
            fetcher,
            request_delay: DEFAULT_REQUEST_DELAY,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// One source at a time, with a politeness delay between live
    /// requests against the documentation hosts.
    pub async fn load_all(&self, sources: &SourceSet) -> Result<LoadReport, NephragError> {
        let enabled = sources.enabled();
        let mut report = LoadReport::default();

        for (index, source) in enabled.iter().enumerate() {
            if index > 0 && !self.request_delay.is_zero() {
                sleep(self.request_delay).await;
            }
            let outcome = self.fetcher.fetch(source).await;
            report.absorb(outcome);
        }

        report.skipped += sources.len() - enabled.len();
        self.finish(report)
    }

    /// Fetches run as independent tasks, bounded by a counting semaphore
    /// over the fetcher's pooled HTTP client. A failed or timed-out task
    /// only fails its own source; siblings keep going.
    pub async fn load_all_concurrent(
        &self,
        sources: &SourceSet,
    ) -> Result<LoadReport, NephragError> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let enabled = sources.enabled();

        let fetches = enabled.iter().map(|source| {
            let fetcher = self.fetcher.clone();
            let semaphore = Arc::clone(&semaphore);
            let source = (*source).clone();
            async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return FetchOutcome::cancelled(),
                };
                fetcher.fetch(&source).await
            }
        });

        let outcomes = join_all(fetches).await;

        let mut report = LoadReport::default();
        for outcome in outcomes {
            report.absorb(outcome);
        }

        report.skipped += sources.len() - enabled.len();
        self.finish(report)
    }

    fn finish(&self, report: LoadReport) -> Result<LoadReport, NephragError> {
        tracing::info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            fallbacks = report.fallbacks,
            failed = report.failed,
            retries = report.retries,
            success_rate = report.success_rate(),
            "batch load finished"
        );

        // An empty corpus is a fatal precondition failure for the rest
        // of the pipeline.
        if report.documents.is_empty() {
            return Err(NephragError::NoDocuments {
                attempted: report.attempted,
            });
        }

        Ok(report)
    }
}

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nephrag_core::{metadata_keys, DocumentSource, FetchErrorKind, SourceKind, Value};
use nephrag_ingest::{DocumentFetcher, FetcherConfig};

const DOC_HTML: &str = r#"
<html>
<body>
    <nav>Site navigation that should disappear</nav>
    <main>
        <h1>Nephio architecture</h1>
        <p>Nephio layers package orchestration on top of Kubernetes so that
        network functions are deployed through declarative configuration
        packages instead of imperative scripts.</p>
        <p>Workload clusters pull specialized package variants from the
        management cluster and reconcile them continuously.</p>
    </main>
</body>
</html>
"#;

fn test_config() -> FetcherConfig {
    FetcherConfig {
        backoff_base: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
        ..FetcherConfig::default()
    }
}

fn source_for(server: &MockServer, route: &str) -> DocumentSource {
    DocumentSource::new(
        format!("{}{route}", server.uri()),
        SourceKind::Nephio,
        "nephio docs",
        1,
    )
    .expect("valid source")
}

#[tokio::test]
async fn succeeds_on_third_attempt_after_two_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DOC_HTML, "text/html"))
        .mount(&server)
        .await;

    let fetcher = DocumentFetcher::new(test_config()).unwrap();
    let outcome = fetcher.fetch(&source_for(&server, "/docs")).await;

    assert_eq!(outcome.attempts, 3);
    assert_eq!(outcome.retries, 2);
    let document = outcome.document.expect("document after retries");
    assert!(!document.is_fallback());
    assert!(document.content.contains("package orchestration"));
    assert_eq!(
        document.metadata.get(metadata_keys::HTTP_STATUS),
        Some(&Value::from(200))
    );
}

#[tokio::test]
async fn not_found_yields_a_labeled_sample_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = DocumentFetcher::new(test_config()).unwrap();
    let outcome = fetcher.fetch(&source_for(&server, "/missing")).await;

    // 404 is permanent, so no retries happen.
    assert_eq!(outcome.attempts, 1);
    assert_eq!(outcome.retries, 0);
    assert_eq!(outcome.error, Some(FetchErrorKind::HttpStatus(404)));

    let document = outcome.document.expect("fallback document");
    assert!(document.is_fallback());
    assert_eq!(
        document.metadata.get(metadata_keys::FALLBACK_MODE),
        Some(&Value::Bool(true))
    );
    let title = document
        .metadata
        .get(metadata_keys::TITLE)
        .and_then(Value::as_str)
        .expect("fallback title");
    assert!(title.contains("Sample"));
}

#[tokio::test]
async fn not_found_with_fallbacks_disabled_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = FetcherConfig {
        fallback_enabled: false,
        ..test_config()
    };
    let fetcher = DocumentFetcher::new(config).unwrap();
    let outcome = fetcher.fetch(&source_for(&server, "/missing")).await;

    assert!(outcome.document.is_none());
    assert_eq!(outcome.error, Some(FetchErrorKind::HttpStatus(404)));
}

#[tokio::test]
async fn disabled_sources_are_skipped_without_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DOC_HTML, "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = DocumentFetcher::new(test_config()).unwrap();
    let source = source_for(&server, "/docs").disabled();
    let outcome = fetcher.fetch(&source).await;

    assert!(outcome.skipped);
    assert_eq!(outcome.attempts, 0);
    assert!(outcome.document.is_none());
}

#[tokio::test]
async fn content_below_minimum_length_fails_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stub"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body><p>tiny page</p></body></html>", "text/html"),
        )
        .mount(&server)
        .await;

    let config = FetcherConfig {
        fallback_enabled: false,
        ..test_config()
    };
    let fetcher = DocumentFetcher::new(config).unwrap();
    let outcome = fetcher.fetch(&source_for(&server, "/stub")).await;

    assert_eq!(outcome.attempts, 1);
    assert!(outcome.document.is_none());
    assert!(matches!(
        outcome.error,
        Some(FetchErrorKind::ContentTooShort { minimum: 100, .. })
    ));
}

#[tokio::test]
async fn timeouts_are_retried_until_attempts_run_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(DOC_HTML, "text/html")
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    let config = FetcherConfig {
        timeout: Duration::from_millis(100),
        max_retries: 2,
        fallback_enabled: false,
        backoff_base: Duration::from_millis(5),
        ..FetcherConfig::default()
    };
    let fetcher = DocumentFetcher::new(config).unwrap();
    let outcome = fetcher.fetch(&source_for(&server, "/slow")).await;

    assert_eq!(outcome.attempts, 2);
    assert_eq!(outcome.retries, 1);
    assert!(outcome.document.is_none());
    assert_eq!(outcome.error, Some(FetchErrorKind::Timeout));
}

#[tokio::test]
async fn zero_max_retries_is_rejected_at_construction() {
    let config = FetcherConfig {
        max_retries: 0,
        ..FetcherConfig::default()
    };
    assert!(DocumentFetcher::new(config).is_err());
}

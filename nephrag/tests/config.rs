use nephrag::{NephragError, Settings};

#[test]
fn default_settings_validate() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn zero_chunk_size_is_rejected() {
    let settings = Settings {
        chunk_size: 0,
        ..Settings::default()
    };
    assert!(matches!(
        settings.validate().unwrap_err(),
        NephragError::InvalidConfig(_)
    ));
}

#[test]
fn overlap_must_stay_below_chunk_size() {
    let settings = Settings {
        chunk_size: 100,
        chunk_overlap: 100,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn zero_embedding_dimension_is_rejected() {
    let settings = Settings {
        embedding_dimension: 0,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn zero_retries_and_zero_concurrency_are_rejected() {
    let settings = Settings {
        max_retries: 0,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());

    let settings = Settings {
        max_concurrency: 0,
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn llm_base_url_requires_a_model_name() {
    let settings = Settings {
        llm_base_url: Some("http://localhost:11434".to_string()),
        llm_model: "  ".to_string(),
        ..Settings::default()
    };
    assert!(settings.validate().is_err());
}

// Environment manipulation stays inside one test so parallel tests in
// this binary never race on process-wide state.
#[test]
fn from_env_reads_overrides_and_rejects_bad_values() {
    std::env::set_var("NEPHRAG_CHUNK_SIZE", "250");
    std::env::set_var("NEPHRAG_MAX_CONCURRENCY", "2");
    let settings = Settings::from_env().expect("valid settings");
    assert_eq!(settings.chunk_size, 250);
    assert_eq!(settings.max_concurrency, 2);

    std::env::set_var("NEPHRAG_CHUNK_SIZE", "not-a-number");
    let err = Settings::from_env().unwrap_err();
    assert!(matches!(err, NephragError::InvalidConfig(_)));

    std::env::set_var("NEPHRAG_CHUNK_SIZE", "0");
    assert!(Settings::from_env().is_err());

    std::env::remove_var("NEPHRAG_CHUNK_SIZE");
    std::env::remove_var("NEPHRAG_MAX_CONCURRENCY");
    assert_eq!(
        Settings::from_env().expect("defaults").chunk_size,
        Settings::default().chunk_size
    );
}

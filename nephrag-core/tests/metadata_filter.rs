use std::collections::HashMap;

use nephrag_core::{metadata_keys, MetadataFilter, Value};

fn metadata(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn eq_matches_exact_value() {
    let meta = metadata(&[("source_kind", Value::String("nephio".to_string()))]);
    let filter = MetadataFilter::Eq(
        "source_kind".to_string(),
        Value::String("nephio".to_string()),
    );
    assert!(filter.matches(&meta));

    let filter = MetadataFilter::Eq(
        "source_kind".to_string(),
        Value::String("oran_sc".to_string()),
    );
    assert!(!filter.matches(&meta));
}

#[test]
fn not_eq_matches_when_key_is_absent() {
    let meta = metadata(&[]);
    let filter = MetadataFilter::NotEq(metadata_keys::IS_SAMPLE.to_string(), Value::Bool(true));
    assert!(filter.matches(&meta));
}

#[test]
fn not_eq_rejects_matching_value() {
    let meta = metadata(&[(metadata_keys::IS_SAMPLE, Value::Bool(true))]);
    let filter = MetadataFilter::NotEq(metadata_keys::IS_SAMPLE.to_string(), Value::Bool(true));
    assert!(!filter.matches(&meta));
}

#[test]
fn all_requires_every_clause() {
    let meta = metadata(&[
        ("source_kind", Value::String("nephio".to_string())),
        (metadata_keys::IS_SAMPLE, Value::Bool(false)),
    ]);
    let filter = MetadataFilter::All(vec![
        MetadataFilter::Eq(
            "source_kind".to_string(),
            Value::String("nephio".to_string()),
        ),
        MetadataFilter::NotEq(metadata_keys::IS_SAMPLE.to_string(), Value::Bool(true)),
    ]);
    assert!(filter.matches(&meta));

    let filter = MetadataFilter::All(vec![
        MetadataFilter::Eq(
            "source_kind".to_string(),
            Value::String("oran_sc".to_string()),
        ),
        MetadataFilter::NotEq(metadata_keys::IS_SAMPLE.to_string(), Value::Bool(true)),
    ]);
    assert!(!filter.matches(&meta));
}

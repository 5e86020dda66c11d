use std::collections::HashMap;

use nephrag_core::{Document, StoreError, VectorStore};
use nephrag_retrieval::InMemoryVectorStore;

fn doc(id: &str, content: &str, embedding: Vec<f32>) -> Document {
    Document {
        id: id.to_string(),
        content: content.to_string(),
        metadata: HashMap::new(),
        embedding: Some(embedding),
    }
}

#[tokio::test]
async fn ranks_by_cosine_similarity() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![
            doc("a", "a", vec![1.0, 0.0, 0.0]),
            doc("b", "b", vec![0.0, 1.0, 0.0]),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 0.0, 0.0], 1, None).await.unwrap();
    assert_eq!(results[0].document.id, "a");
}

#[tokio::test]
async fn dimension_mismatch_on_add_is_an_error() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![doc("a", "a", vec![1.0, 0.0])])
        .await
        .unwrap();

    let err = store
        .add(vec![doc("b", "b", vec![1.0, 0.0, 0.0])])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DimensionMismatch {
            expected: 2,
            got: 3
        }
    ));
}

#[tokio::test]
async fn dimension_mismatch_on_search_is_an_error() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![doc("a", "a", vec![1.0, 0.0])])
        .await
        .unwrap();

    let err = store.search(&[1.0, 0.0, 0.0], 1, None).await.unwrap_err();
    assert!(matches!(err, StoreError::DimensionMismatch { .. }));
}

#[tokio::test]
async fn missing_embedding_is_an_error() {
    let store = InMemoryVectorStore::new();
    let mut document = doc("a", "a", vec![1.0]);
    document.embedding = None;

    let err = store.add(vec![document]).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingEmbedding(id) if id == "a"));
}

#[tokio::test]
async fn searching_an_empty_store_returns_nothing() {
    let store = InMemoryVectorStore::new();
    let results = store.search(&[1.0, 0.0], 5, None).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn k_larger_than_entry_count_returns_all_entries() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![
            doc("a", "a", vec![1.0, 0.0]),
            doc("b", "b", vec![0.0, 1.0]),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 1.0], 50, None).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn tied_scores_keep_insertion_order() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![
            doc("first", "first", vec![1.0, 0.0]),
            doc("second", "second", vec![1.0, 0.0]),
            doc("third", "third", vec![1.0, 0.0]),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 0.0], 3, None).await.unwrap();
    let ids: Vec<&str> = results
        .iter()
        .map(|result| result.document.id.as_str())
        .collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn nan_scores_do_not_panic() {
    let store = InMemoryVectorStore::new();
    store
        .add(vec![
            doc("a", "a", vec![f32::NAN, 0.0, 0.0]),
            doc("b", "b", vec![0.0, 1.0, 0.0]),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 0.0, 0.0], 5, None).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results.last().map(|r| r.document.id.as_str()), Some("a"));
}

use std::collections::HashMap;

use tempfile::tempdir;

use nephrag_core::{Document, VectorStore};
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
async fn save_then_load_reproduces_search_results() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("index.json");

    let store = InMemoryVectorStore::new();
    store
        .add(vec![
            doc("a", "kubernetes operators", vec![0.9, 0.1, 0.0]),
            doc("b", "package orchestration", vec![0.1, 0.9, 0.0]),
            doc("c", "cluster provisioning", vec![0.0, 0.1, 0.9]),
        ])
        .await
        .unwrap();
    store.save(&path).await.unwrap();

    let reloaded = InMemoryVectorStore::load(&path).await.unwrap();
    assert_eq!(reloaded.len().await, 3);

    let query = [0.8, 0.2, 0.0];
    let before = store.search(&query, 2, None).await.unwrap();
    let after = reloaded.search(&query, 2, None).await.unwrap();

    assert_eq!(before.len(), after.len());
    for (lhs, rhs) in before.iter().zip(after.iter()) {
        assert_eq!(lhs.document, rhs.document);
        assert!((lhs.score - rhs.score).abs() < f32::EPSILON);
    }
}

#[tokio::test]
async fn loading_a_missing_file_yields_an_empty_index() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("does_not_exist.json");

    let store = InMemoryVectorStore::load(&path).await.unwrap();
    assert!(store.is_empty().await);

    let results = store.search(&[1.0, 0.0], 5, None).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn reloaded_index_still_enforces_dimensionality() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("index.json");

    let store = InMemoryVectorStore::new();
    store.add(vec![doc("a", "a", vec![1.0, 0.0])]).await.unwrap();
    store.save(&path).await.unwrap();

    let reloaded = InMemoryVectorStore::load(&path).await.unwrap();
    let err = reloaded
        .add(vec![doc("b", "b", vec![1.0, 0.0, 0.0])])
        .await
        .unwrap_err();
    assert!(format!("{err}").contains("dimension mismatch"));
}

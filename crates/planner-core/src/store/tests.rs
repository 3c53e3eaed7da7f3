use std::path::PathBuf;

use serde_json::json;
use tempfile::tempdir;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use super::*;
use crate::config::{BackendKind, PlannerConfig};

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path("locationGraph").unwrap(), "locationGraph");
    assert_eq!(
        normalize_path("/availableTimes/weekend/").unwrap(),
        "availableTimes/weekend"
    );
    assert!(normalize_path("").is_err());
    assert!(normalize_path("a//b").is_err());
    assert!(normalize_path("../etc/passwd").is_err());
    assert!(normalize_path("a/./b").is_err());
}

async fn assert_overwrite_semantics(store: &dyn DocumentStore) {
    assert_eq!(store.read("locationGraph").await.unwrap(), None);

    store
        .write("locationGraph", &json!({"Delhi": {"value": {"state": "DL"}}}))
        .await
        .unwrap();
    store
        .write("locationGraph", &json!({"Goa": {}}))
        .await
        .unwrap();

    // Full overwrite, not a merge
    assert_eq!(
        store.read("locationGraph").await.unwrap(),
        Some(json!({"Goa": {}}))
    );

    store
        .write("availableTimes/weekend", &json!({"u1": {"k1": "10am"}}))
        .await
        .unwrap();
    assert_eq!(
        store.read("/availableTimes/weekend").await.unwrap(),
        Some(json!({"u1": {"k1": "10am"}}))
    );

    store.write("locationGraph", &Value::Null).await.unwrap();
    assert_eq!(store.read("locationGraph").await.unwrap(), None);
    // Removing twice is fine
    store.write("locationGraph", &Value::Null).await.unwrap();
}

#[tokio::test]
async fn test_memory_store_overwrites() {
    let store = MemoryStore::new();
    assert!(store.is_empty().await);
    assert_overwrite_semantics(&store).await;
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_file_store_overwrites() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("data"));
    assert_overwrite_semantics(&store).await;
    assert!(dir
        .path()
        .join("data")
        .join("availableTimes")
        .join("weekend.json")
        .is_file());
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_document() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("locationGraph.json"), "{not json").unwrap();

    let store = FileStore::new(dir.path());
    let err = store.read("locationGraph").await.unwrap_err();
    assert!(matches!(err, PlannerError::MalformedDocument { .. }));
}

#[tokio::test]
async fn test_sqlite_store_overwrites() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_overwrite_semantics(&store).await;
}

#[tokio::test]
async fn test_sqlite_store_persists_across_connections() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("nested").join("planner.db");

    {
        let store = SqliteStore::open(&db_path).unwrap();
        store
            .write("locationGraph", &json!({"Agra": {}}))
            .await
            .unwrap();
        assert!(store.updated_at("locationGraph").await.unwrap().is_some());
    }

    let reopened = SqliteStore::open(&db_path).unwrap();
    assert_eq!(
        reopened.read("locationGraph").await.unwrap(),
        Some(json!({"Agra": {}}))
    );
    assert_eq!(reopened.updated_at("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_rest_store_put_and_get() {
    let server = MockServer::start().await;
    let document = json!({"Delhi": {"connectedLocations": {"Agra": true}}});

    Mock::given(matchers::method("PUT"))
        .and(matchers::path("/locationGraph.json"))
        .and(matchers::query_param("auth", "secret"))
        .and(matchers::body_json(&document))
        .respond_with(ResponseTemplate::new(200).set_body_json(&document))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/locationGraph.json"))
        .and(matchers::query_param("auth", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&document))
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), Some("secret".to_string()), 5).unwrap();
    store.write("locationGraph", &document).await.unwrap();
    assert_eq!(store.read("locationGraph").await.unwrap(), Some(document));
}

#[tokio::test]
async fn test_rest_store_null_reads_as_absent() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("GET"))
        .and(matchers::path("/availableTimes/weekend.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), None, 5).unwrap();
    assert_eq!(store.read("availableTimes/weekend").await.unwrap(), None);
}

#[tokio::test]
async fn test_rest_store_surfaces_status_errors() {
    let server = MockServer::start().await;

    Mock::given(matchers::method("PUT"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Permission denied"})))
        .mount(&server)
        .await;

    let store = RestStore::new(&server.uri(), None, 5).unwrap();
    let err = store
        .write("locationGraph", &json!({"Goa": {}}))
        .await
        .unwrap_err();

    match err {
        PlannerError::HttpStatus { method, status, .. } => {
            assert_eq!(method, "PUT");
            assert_eq!(status, 401);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rest_store_rejects_non_http_url() {
    let err = RestStore::new("ftp://planner.example.com", None, 5).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidValue { .. }));
}

#[test]
fn test_open_store_selects_backend() {
    let dir = tempdir().unwrap();
    let mut config = PlannerConfig::default();

    let store = open_store(&config, dir.path()).unwrap();
    assert!(store.describe().starts_with("file:"));

    config.backend.kind = BackendKind::Sqlite;
    config.backend.path = Some(PathBuf::from("planner.db"));
    let store = open_store(&config, dir.path()).unwrap();
    assert!(store.describe().starts_with("sqlite:"));
    assert!(dir.path().join("planner.db").exists());

    config.backend.kind = BackendKind::Memory;
    assert_eq!(open_store(&config, dir.path()).unwrap().describe(), "memory");
}

#[test]
fn test_open_store_rest_requires_url() {
    let dir = tempdir().unwrap();
    let mut config = PlannerConfig::default();
    config.backend.kind = BackendKind::Rest;

    let err = open_store(&config, dir.path()).err().unwrap();
    assert!(matches!(err, PlannerError::UsageError(_)));

    config.backend.url = Some("https://planner.example.com/".to_string());
    let store = open_store(&config, dir.path()).unwrap();
    assert_eq!(store.describe(), "rest:https://planner.example.com");
}

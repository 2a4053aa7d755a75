//! Appwrite search count store tests
//!
//! Verifies the REST calls the store issues against a mock document database.

use reeldeck::modules::search_count::{
    AppwriteSearchCountStore, MovieRef, NewSearchCount, SearchCountRegistry, SearchCountStore,
};
use reeldeck::shared::{AppError, AppwriteConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const DOCUMENTS_PATH: &str = "/v1/databases/moviesdb/collections/metrics/documents";

fn store_for(server: &MockServer) -> AppwriteSearchCountStore {
    let config = AppwriteConfig::new("project-1", "moviesdb", "metrics")
        .with_endpoint(format!("{}/v1", server.uri()));
    AppwriteSearchCountStore::new(config).unwrap()
}

/// Matches when every expected query is present among the `queries[]` parameters
fn has_queries(expected: Vec<Value>) -> impl Fn(&Request) -> bool + Send + Sync + 'static {
    move |request: &Request| {
        let sent: Vec<Value> = request
            .url
            .query_pairs()
            .filter(|(key, _)| key == "queries[]")
            .filter_map(|(_, value)| serde_json::from_str(&value).ok())
            .collect();
        expected.iter().all(|query| sent.contains(query))
    }
}

fn document(id: &str, term: &str, count: i64) -> Value {
    json!({
        "$id": id,
        "$createdAt": "2024-05-24T20:00:02.000+00:00",
        "$updatedAt": "2024-05-24T20:00:02.000+00:00",
        "searchTerm": term,
        "movie_id": 438631,
        "title": "Dune",
        "poster_url": "https://image.tmdb.org/t/p/w500/abc.jpg",
        "count": count
    })
}

#[tokio::test]
async fn test_find_by_term_filters_on_search_term() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(header("X-Appwrite-Project", "project-1"))
        .and(has_queries(vec![
            json!({"method": "equal", "attribute": "searchTerm", "values": ["dune"]}),
        ]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "documents": [document("doc-1", "dune", 3)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = store_for(&server).find_by_term("dune").await.unwrap().unwrap();

    assert_eq!(record.id, "doc-1");
    assert_eq!(record.count, 3);
}

#[tokio::test]
async fn test_find_by_term_without_match_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"total": 0, "documents": []})),
        )
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).find_by_term("dune").await.unwrap(), None);
}

#[tokio::test]
async fn test_create_lets_server_assign_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .and(body_partial_json(json!({
            "documentId": "unique()",
            "data": {"searchTerm": "dune", "movie_id": 438631, "count": 1}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(document("generated-id", "dune", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let created = store_for(&server)
        .create(NewSearchCount::first_search(
            "dune",
            &MovieRef::new(438631, "Dune", Some("/abc.jpg")),
        ))
        .await
        .unwrap();

    assert_eq!(created.id, "generated-id");
    assert_eq!(created.count, 1);
}

#[tokio::test]
async fn test_update_count_addresses_document_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(format!("{}/doc-1", DOCUMENTS_PATH)))
        .and(body_partial_json(json!({"data": {"count": 4}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(document("doc-1", "dune", 4)))
        .expect(1)
        .mount(&server)
        .await;

    let updated = store_for(&server).update_count("doc-1", 4).await.unwrap();
    assert_eq!(updated.count, 4);
}

#[tokio::test]
async fn test_list_top_orders_by_count_with_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .and(has_queries(vec![
            json!({"method": "limit", "values": [5]}),
            json!({"method": "orderDesc", "attribute": "count"}),
        ]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "documents": [document("a", "dune", 9), document("b", "alien", 2)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let top = store_for(&server).list_top(5).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].search_term, "dune");
}

#[tokio::test]
async fn test_server_errors_are_store_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = store_for(&server)
        .create(NewSearchCount::first_search(
            "dune",
            &MovieRef::new(438631, "Dune", None),
        ))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AppError::StoreError("Failed to create search count: Service Unavailable".to_string())
    );
}

#[tokio::test]
async fn test_registry_increments_existing_document() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "documents": [document("doc-9", "dune", 1)]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{}/doc-9", DOCUMENTS_PATH)))
        .and(body_partial_json(json!({"data": {"count": 2}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(document("doc-9", "dune", 2)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(DOCUMENTS_PATH))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let registry = SearchCountRegistry::new(Arc::new(store_for(&server)));
    let record = registry
        .record("dune", &MovieRef::new(438631, "Dune", Some("/abc.jpg")))
        .await
        .unwrap();

    assert_eq!(record.count, 2);
}

#[tokio::test]
async fn test_registry_trending_survives_unreachable_store() {
    // Port 1 is reserved and closed, so every request fails to connect
    let config = AppwriteConfig::new("project-1", "moviesdb", "metrics")
        .with_endpoint("http://127.0.0.1:1/v1");
    let store = AppwriteSearchCountStore::new(config).unwrap();

    assert!(matches!(store.list_top(5).await, Err(AppError::StoreError(_))));

    let registry = SearchCountRegistry::new(Arc::new(store));
    assert_eq!(registry.get_top_trending().await, None);
}

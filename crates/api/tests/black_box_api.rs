use std::sync::Arc;

use bookshelf_infra::InMemoryBookStore;
use reqwest::StatusCode;
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    store: Arc<InMemoryBookStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory store, ephemeral port.
        let store = Arc::new(InMemoryBookStore::new());
        let app = bookshelf_api::app::build_app(store.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_book(client: &reqwest::Client, srv: &TestServer, body: Value) -> Value {
    let res = client.post(srv.url("/books")).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

fn dune() -> Value {
    json!({ "title": "Dune", "author": "Herbert", "year": 1965 })
}

const MISSING_ID: &str = "65f0c0ffee0000000000beef";

#[tokio::test]
async fn root_is_a_liveness_probe() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Hello, World!" }));
}

#[tokio::test]
async fn create_then_get_returns_same_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_book(&client, &srv, dune()).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["title"], "Dune");
    assert_eq!(created["author"], "Herbert");
    assert_eq!(created["year"], 1965);

    let res = client.get(srv.url(&format!("/books/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_contains_created_books() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/books")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let empty: Value = res.json().await.unwrap();
    assert_eq!(empty, json!([]));

    let a = create_book(&client, &srv, dune()).await;
    let b = create_book(
        &client,
        &srv,
        json!({ "title": "Neuromancer", "author": "Gibson", "year": 1984 }),
    )
    .await;

    let listed: Value = client
        .get(srv.url("/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([a, b]));
}

#[tokio::test]
async fn client_supplied_id_is_ignored_on_create() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_book(
        &client,
        &srv,
        json!({ "id": MISSING_ID, "title": "Dune", "author": "Herbert", "year": "1965" }),
    )
    .await;

    assert_ne!(created["id"], MISSING_ID);
    assert_eq!(created["year"], 1965);
}

#[tokio::test]
async fn invalid_create_lists_offending_fields_and_stores_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/books"))
        .json(&json!({ "title": "", "year": "soon" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "author", "year"]);
    assert_eq!(srv.store.write_count(), 0);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/books"))
        .header("content-type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_json");
}

#[tokio::test]
async fn get_distinguishes_missing_and_malformed_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url(&format!("/books/{MISSING_ID}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Book not found");

    let res = client.get(srv.url("/books/not-an-id")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_book(&client, &srv, dune()).await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .put(srv.url(&format!("/books/{id}")))
        .json(&json!({ "year": 1966 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(
        updated,
        json!({ "id": id, "title": "Dune", "author": "Herbert", "year": 1966 })
    );

    let fetched: Value = client
        .get(srv.url(&format!("/books/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn empty_update_returns_current_record_without_writing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_book(&client, &srv, dune()).await;
    let id = created["id"].as_str().unwrap();
    let writes = srv.store.write_count();

    let res = client
        .put(srv.url(&format!("/books/{id}")))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, created);

    // No payload at all behaves the same.
    let res = client.put(srv.url(&format!("/books/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, created);

    assert_eq!(srv.store.write_count(), writes);
}

#[tokio::test]
async fn update_of_unknown_book_fails_and_leaves_storage_unchanged() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_book(&client, &srv, dune()).await;

    let res = client
        .put(srv.url(&format!("/books/{MISSING_ID}")))
        .json(&json!({ "year": 1966 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Failed to update book");

    let listed: Value = client
        .get(srv.url("/books"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn invalid_update_is_rejected_before_storage() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_book(&client, &srv, dune()).await;
    let id = created["id"].as_str().unwrap();
    let writes = srv.store.write_count();

    let res = client
        .put(srv.url(&format!("/books/{id}")))
        .json(&json!({ "author": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(srv.store.write_count(), writes);
}

#[tokio::test]
async fn delete_twice_reports_failure_the_second_time() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_book(&client, &srv, dune()).await;
    let id = created["id"].as_str().unwrap();

    let res = client.delete(srv.url(&format!("/books/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Book deleted successfully" }));

    let res = client.delete(srv.url(&format!("/books/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Failed to delete book");

    let res = client.get(srv.url(&format!("/books/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/books"))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me-123");

    let res = client.get(srv.url("/")).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(!generated.is_empty());
    assert_ne!(generated, "trace-me-123");
}

#[tokio::test]
async fn unmatched_paths_get_a_json_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/books/", "/nope", "/books/65f0c0ffee0000000000beef/extra"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
        assert!(res.headers().contains_key("x-request-id"));
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "not_found", "{path}");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/v1/openapi.json")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    assert_eq!(doc["info"]["title"], "Books API");
    assert_eq!(doc["info"]["description"], "A simple CRUD API for managing books");
    assert_eq!(doc["info"]["version"], "1.0.0");
    assert!(doc["paths"]["/books"].is_object());
    assert!(doc["paths"]["/books/{id}"].is_object());

    for page in ["/api/v1/docs/", "/api/v1/redoc"] {
        let res = client.get(srv.url(page)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{page}");
        let html = res.text().await.unwrap();
        assert!(html.contains("<html") || html.contains("<!DOCTYPE"), "{page}");
    }
}

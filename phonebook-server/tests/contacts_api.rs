//! End-to-end tests for the contacts API, driven through the router

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use phonebook_core::DatabaseConfig;
use phonebook_server::{bootstrap, build_router, create_pool, AppState, ServerConfig};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    pool: SqlitePool,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_database(|_| {}).await
    }

    async fn with_database(configure: impl FnOnce(&mut DatabaseConfig)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut database = DatabaseConfig::at(dir.path().join("phonebook.db"));
        configure(&mut database);

        let pool = create_pool(&database).await.unwrap();
        bootstrap(&pool).await.unwrap();
        let router = build_router(Arc::new(AppState::new(pool.clone())), &ServerConfig::default());

        Self {
            _dir: dir,
            pool,
            router,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn list(&self) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri("/api/contacts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn create(&self, body: Value) -> (StatusCode, Value) {
        self.create_raw(body.to_string()).await
    }

    async fn create_raw(&self, body: impl Into<Body>) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/contacts")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
    }

    async fn delete(&self, id: impl std::fmt::Display) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/contacts/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

#[tokio::test]
async fn fresh_store_lists_empty_array() {
    let app = TestApp::new().await;

    let (status, body) = app.list().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_round_trip() {
    let app = TestApp::new().await;

    let (status, created) = app
        .create(json!({"name": "Alice", "phone": "555-0100"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["id"].is_i64());
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["phone"], "555-0100");

    let (_, listed) = app.list().await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn delete_removes_contact() {
    let app = TestApp::new().await;
    let (_, created) = app
        .create(json!({"name": "Alice", "phone": "555-0100"}))
        .await;

    let (status, body) = app.delete(&created["id"]).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, listed) = app.list().await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn delete_unknown_returns_404() {
    let app = TestApp::new().await;

    let (status, body) = app.delete(99).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Contact not found"}));
}

#[tokio::test]
async fn ids_are_distinct_and_increasing() {
    let app = TestApp::new().await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let (_, created) = app
            .create(json!({"name": format!("person-{i}"), "phone": "555-0000"}))
            .await;
        ids.push(created["id"].as_i64().unwrap());
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 5);
}

#[tokio::test]
async fn bootstrap_again_keeps_data() {
    let app = TestApp::new().await;
    let (_, created) = app.create(json!({"name": "Bob", "phone": "555-1234"})).await;

    bootstrap(&app.pool).await.unwrap();
    bootstrap(&app.pool).await.unwrap();

    let (_, listed) = app.list().await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn bob_and_carol_scenario() {
    let app = TestApp::new().await;

    let (status, bob) = app.create(json!({"name": "Bob", "phone": "555-1234"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bob, json!({"id": 1, "name": "Bob", "phone": "555-1234"}));

    let (_, carol) = app
        .create(json!({"name": "Carol", "phone": "555-5678"}))
        .await;
    assert_eq!(carol, json!({"id": 2, "name": "Carol", "phone": "555-5678"}));

    let (_, listed) = app.list().await;
    assert_eq!(listed, json!([bob.clone(), carol.clone()]));

    let (status, _) = app.delete(1).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = app.list().await;
    assert_eq!(listed, json!([carol]));

    let (status, body) = app.delete(1).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Contact not found");
}

#[tokio::test]
async fn invalid_bodies_are_422_and_write_nothing() {
    let app = TestApp::new().await;

    let cases = [
        json!({"name": "Alice"}).to_string(),
        json!({"phone": "555-0100"}).to_string(),
        json!({"name": "Alice", "phone": 5550100}).to_string(),
        json!({"name": null, "phone": "555-0100"}).to_string(),
        json!(["Alice", "555-0100"]).to_string(),
        json!("Alice").to_string(),
        "{not json".to_string(),
    ];

    for body in cases {
        let (status, error) = app.create_raw(body.clone()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
        assert!(error["detail"].is_string(), "body: {body}");
    }

    // a valid object still needs a JSON content type
    let valid = json!({"name": "Alice", "phone": "555-0100"}).to_string();
    for content_type in [None, Some("text/plain")] {
        let mut request = Request::builder().method(Method::POST).uri("/api/contacts");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let (status, error) = app
            .send(request.body(Body::from(valid.clone())).unwrap())
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{content_type:?}");
        assert!(error["detail"].is_string(), "{content_type:?}");
    }

    let (_, listed) = app.list().await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn empty_strings_are_accepted() {
    let app = TestApp::new().await;

    let (status, created) = app.create(json!({"name": "", "phone": ""})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "");
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = TestApp::new().await;

    let (status, body) = app.delete("abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn handles_are_released_on_every_exit_path() {
    let app = TestApp::with_database(|db| {
        db.max_connections = 1;
        db.acquire_timeout_secs = 2;
    })
    .await;

    for round in 0..5 {
        let (status, _) = app.delete(1000 + round).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.create(json!({"name": "no phone"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = app
            .create(json!({"name": format!("r{round}"), "phone": "555"}))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, listed) = app.list().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), round as usize + 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_unique_ids() {
    let app = Arc::new(TestApp::new().await);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let app = Arc::clone(&app);
            tokio::spawn(async move {
                let (status, created) = app
                    .create(json!({"name": format!("c{i}"), "phone": "555"}))
                    .await;
                assert_eq!(status, StatusCode::OK);
                created["id"].as_i64().unwrap()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.expect("task panicked"));
    }
    assert_eq!(ids.len(), 10);

    let (_, listed) = app.list().await;
    assert_eq!(listed.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

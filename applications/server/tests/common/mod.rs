//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use soundcheck_server::{config::CorsSettings, create_router, AppState, AuthService};
use soundcheck_storage::LocalStorageContext;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

pub const API_PREFIX: &str = "/api/v1";

/// Router over a fresh file-backed database
pub struct TestApp {
    pub router: Router,
    pub store: Arc<LocalStorageContext>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = soundcheck_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        soundcheck_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let store = Arc::new(LocalStorageContext::new(pool));
        let auth_service =
            Arc::new(AuthService::new(TEST_BCRYPT_COST).expect("valid bcrypt cost"));

        let app_state = AppState::new(store.clone(), auth_service);
        let router = create_router(app_state, API_PREFIX, &CorsSettings::default())
            .expect("Failed to build router");

        Self {
            router,
            store,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request to `path` (relative to the API prefix)
    ///
    /// Returns the status and the body parsed as JSON, or `Value::Null` when
    /// the body is not JSON.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(format!("{API_PREFIX}{path}"));

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, None).await
    }

    /// Create an artist and return its id
    pub async fn create_artist(&self, name: &str) -> i64 {
        let (status, body) = self
            .post("/artists", serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["artist_id"].as_i64().expect("artist_id")
    }

    /// Create an album and return its id
    pub async fn create_album(&self, title: &str, artist_id: i64, release_date: &str) -> i64 {
        let (status, body) = self
            .post(
                "/albums",
                serde_json::json!({
                    "title": title,
                    "release_date": release_date,
                    "artist_id": artist_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["album_id"].as_i64().expect("album_id")
    }

    /// Post a comment and return the response status
    pub async fn comment(&self, album_id: i64, username: &str, rating: i64) -> StatusCode {
        let (status, _) = self
            .post(
                &format!("/albums/{album_id}/comments"),
                serde_json::json!({
                    "username": username,
                    "rating": rating,
                    "comment_text": format!("{username} rates it {rating}"),
                }),
            )
            .await;
        status
    }
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_EMAIL: &str = "testuser@example.com";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}

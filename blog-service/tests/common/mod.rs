#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use blog_service::config::{BlogConfig, DatabaseConfig};
use blog_service::services::{DocumentStore, InMemoryStore};
use blog_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_DATABASE: &str = "blog_test";

pub fn test_config(database: DatabaseConfig) -> BlogConfig {
    BlogConfig {
        // Random port for testing
        common: CoreConfig { port: 0 },
        database,
    }
}

pub fn memory_database() -> DatabaseConfig {
    DatabaseConfig {
        url: Some("memory://test".to_string()),
        name: Some(TEST_DATABASE.to_string()),
    }
}

/// Router over an explicit store, for in-process `oneshot` requests.
pub fn router_with(database: DatabaseConfig, store: Option<Arc<dyn DocumentStore>>) -> Router {
    build_router(AppState::new(test_config(database), store))
}

pub async fn send(router: Router, request: Request<Body>) -> (Response<Body>, serde_json::Value) {
    let response = router.oneshot(request).await.expect("request failed");
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.expect("body read failed").to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (Response::from_parts(parts, Body::from(bytes)), json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A running server on a random port backed by an in-memory store.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryStore::new(TEST_DATABASE));
        let dyn_store: Arc<dyn DocumentStore> = store.clone();

        let app = Application::build_with_store(test_config(memory_database()), Some(dyn_store))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            client,
        }
    }

    pub async fn create_post(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/posts", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_posts(&self, query: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/api/posts{}", self.address, query))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use weightshare_api::{AppState, build_app};
use weightshare_core::config::AppConfig;
use weightshare_core::error::AppError;
use weightshare_core::result::AppResult;
use weightshare_core::traits::ManualClock;
use weightshare_core::types::ShareId;
use weightshare_database::ShareStore;
use weightshare_database::repositories::MemoryShareStore;
use weightshare_entity::ShareRecord;

/// Public base URL configured for most tests
pub const BASE_URL: &str = "http://weights.test";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: Arc<MemoryShareStore>,
    /// Clock driving creation stamps and expiry
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Create a test application with a configured base URL
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.share.base_url = Some(BASE_URL.to_string());
        Self::with_config(config)
    }

    /// Create a test application from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryShareStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let state = AppState::new(config, store.clone(), clock.clone());

        Self {
            router: build_app(state),
            store,
            clock,
        }
    }

    /// Create a test application whose store is always unreachable
    pub fn down() -> Self {
        let mut config = AppConfig::default();
        config.share.base_url = Some(BASE_URL.to_string());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let state = AppState::new(config, Arc::new(DownStore), clock.clone());

        Self {
            router: build_app(state),
            store: Arc::new(MemoryShareStore::new()),
            clock,
        }
    }

    /// Send a request with an optional JSON body and extra headers
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, headers).await
    }

    /// Send a request as if it arrived on a socket from `peer`
    pub async fn request_from(
        &self,
        peer: SocketAddr,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(Some(peer), method, path, body_str, headers).await
    }

    /// Send a request with a raw JSON-typed body
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        self.send(None, method, path, body, headers).await
    }

    async fn send(
        &self,
        peer: Option<SocketAddr>,
        method: &str,
        path: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let mut req = req.body(Body::from(body)).expect("Failed to build request");
        if let Some(peer) = peer {
            req.extensions_mut().insert(ConnectInfo(peer));
        }

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a share and return its identifier
    pub async fn create_share(&self, snapshot: Value) -> String {
        let response = self.request("POST", "/api/shares", Some(snapshot), &[]).await;
        assert_eq!(response.status, StatusCode::OK, "create failed: {}", response.body);
        response.body["shareId"]
            .as_str()
            .expect("shareId in response")
            .to_string()
    }
}

/// Test response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when empty or not JSON)
    pub body: Value,
}

/// A store whose backend is always down
#[derive(Debug)]
pub struct DownStore;

#[async_trait]
impl ShareStore for DownStore {
    async fn insert_one(&self, _record: &ShareRecord) -> AppResult<()> {
        Err(AppError::service_unavailable("connection refused (os error 111)"))
    }

    async fn find_one(
        &self,
        _share_id: &ShareId,
        _created_after: DateTime<Utc>,
    ) -> AppResult<Option<ShareRecord>> {
        Err(AppError::service_unavailable("connection refused (os error 111)"))
    }

    async fn find(
        &self,
        _created_after: DateTime<Utc>,
        _limit: usize,
    ) -> AppResult<Vec<ShareRecord>> {
        Err(AppError::service_unavailable("connection refused (os error 111)"))
    }

    async fn delete_expired(&self, _cutoff: DateTime<Utc>) -> AppResult<u64> {
        Err(AppError::service_unavailable("connection refused (os error 111)"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(AppError::service_unavailable("connection refused (os error 111)"))
    }
}

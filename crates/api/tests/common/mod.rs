#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use radiohub_api::config::ServerConfig;
use radiohub_api::mount_cache::MountStatsCache;
use radiohub_api::router::build_app_router;
use radiohub_api::state::AppState;
use radiohub_core::stream::{ConnectedClient, MountStats, StreamError, StreamSource};
use radiohub_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 10,
        radio_cache_ttl_secs: 10,
    }
}

/// Stream source returning fixed mount stats, or failing when `stats` is
/// `None`.
pub struct StaticSource {
    pub stats: Option<MountStats>,
}

#[async_trait]
impl StreamSource for StaticSource {
    async fn mount_stats(&self) -> Result<MountStats, StreamError> {
        self.stats
            .clone()
            .ok_or_else(|| StreamError::Transport("connection refused".into()))
    }

    async fn connected_clients(&self) -> Result<Vec<ConnectedClient>, StreamError> {
        Ok(Vec::new())
    }
}

pub fn sample_mount_stats() -> MountStats {
    MountStats {
        name: "Radiohub".into(),
        description: "All day rock".into(),
        stream_url: "http://radio.example/mp3".into(),
        listeners: 4,
        listener_peak: 12,
        ..MountStats::default()
    }
}

/// Build the full application router, exactly as `main.rs` does, over the
/// given pool and stream source.
pub fn build_test_app_with_source(pool: PgPool, source: Arc<dyn StreamSource>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        mount_stats: MountStatsCache::new(source, Duration::from_secs(config.radio_cache_ttl_secs)),
    };
    build_app_router(state, &config)
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_source(
        pool,
        Arc::new(StaticSource {
            stats: Some(sample_mount_stats()),
        }),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_as(app: Router, uri: &str, user_id: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_as(app: Router, uri: &str, user_id: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("x-user-id", user_id)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Upsert a track through the API and return the rotation count.
pub async fn upsert_track(app: Router, id: &str, title: &str, cover: &str) -> i64 {
    let body = serde_json::json!({ "Md5": id, "StreamTitle": title, "StreamUrl": cover });
    let response = post_json(app, "/api/v1/tracks", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["rotate"].as_i64().unwrap()
}

//! Drives [`IcecastClient`] against a stub admin server.

use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use radiohub_core::stream::{StreamError, StreamSource};
use radiohub_icecast::{IcecastClient, IcecastConfig, IcecastError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `admin:secret`
const AUTH: &str = "Basic YWRtaW46c2VjcmV0";

const STATS: &str = r#"<icestats>
  <source mount="/mp3">
    <listeners>2</listeners>
    <listener_peak>5</listener_peak>
    <server_name>Radiohub</server_name>
    <title>Song [0123456789abcdef0123456789abcdef]</title>
  </source>
</icestats>"#;

const CLIENTS: &str = r#"<icestats>
  <source mount="/mp3">
    <listener><IP>10.0.0.1</IP><UserAgent>VLC</UserAgent><Connected>1</Connected><ID>1</ID></listener>
  </source>
</icestats>"#;

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(AUTH)
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route(
            "/admin/stats",
            get(|headers: HeaderMap| async move {
                if authorized(&headers) {
                    (StatusCode::OK, STATS)
                } else {
                    (StatusCode::UNAUTHORIZED, "")
                }
            }),
        )
        .route(
            "/admin/listclients",
            get(
                |headers: HeaderMap,
                 Query(params): Query<std::collections::HashMap<String, String>>| async move {
                    if !authorized(&headers) {
                        return (StatusCode::UNAUTHORIZED, "");
                    }
                    match params.get("mount").map(String::as_str) {
                        Some("/mp3") => (StatusCode::OK, CLIENTS),
                        _ => (StatusCode::BAD_REQUEST, "unknown mount"),
                    }
                },
            ),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(base_url: String, password: &str, mount: &str) -> IcecastConfig {
    IcecastConfig {
        base_url,
        username: "admin".into(),
        password: password.into(),
        mount: mount.into(),
        timeout: Duration::from_secs(2),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reads_mount_stats_and_clients() {
    let base = spawn_stub().await;
    let client = IcecastClient::new(config(base, "secret", "/mp3")).unwrap();

    let stats = client.mount_stats().await.unwrap();
    assert_eq!(stats.name, "Radiohub");
    assert_eq!(stats.listeners, 2);
    assert_eq!(stats.listener_peak, 5);

    let clients = client.list_clients().await.unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].ip, "10.0.0.1");
}

#[tokio::test]
async fn bad_credentials_surface_as_status() {
    let base = spawn_stub().await;
    let client = IcecastClient::new(config(base, "wrong", "/mp3")).unwrap();

    assert_matches!(
        client.stats().await,
        Err(IcecastError::ApiError { status: 401, .. })
    );
    assert_matches!(
        StreamSource::mount_stats(&client).await,
        Err(StreamError::Status { status: 401 })
    );
}

#[tokio::test]
async fn missing_mount_is_reported() {
    let base = spawn_stub().await;
    let client = IcecastClient::new(config(base, "secret", "/aac")).unwrap();

    assert_matches!(
        StreamSource::mount_stats(&client).await,
        Err(StreamError::MountNotFound(mount)) if mount == "/aac"
    );
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client =
        IcecastClient::new(config("http://127.0.0.1:1".into(), "secret", "/mp3")).unwrap();

    assert_matches!(
        client.connected_clients().await,
        Err(StreamError::Transport(_))
    );
}

//! Tests for the HTTP routes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use strictly_server::{ClientMessage, GameServer, ServerConfig};
use tokio::sync::mpsc;
use tower::ServiceExt;

async fn get(server: &GameServer, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Request"))
        .await
        .expect("Infallible");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Body")
        .to_bytes()
        .to_vec();
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let server = GameServer::new(ServerConfig::default()).expect("Valid config");
    let (status, body) = get(&server, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).expect("JSON body");
    assert_eq!(value["status"], "ok");
}

#[tokio::test]
async fn test_rooms_listing_tracks_lobby() {
    let server = GameServer::new(ServerConfig::default()).expect("Valid config");

    let (status, body) = get(&server, "/api/rooms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");

    let lobby = server.state().lobby();
    let (outbox, _inbox) = mpsc::unbounded_channel();
    let id = lobby.connect(outbox).await.expect("Lobby running");
    lobby
        .intent(
            id,
            ClientMessage::CreateRoom {
                name: "Alice".to_string(),
            },
        )
        .await
        .expect("Lobby running");

    let (status, body) = get(&server, "/api/rooms").await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).expect("JSON body");
    assert_eq!(value[0]["id"], 1);
    assert_eq!(value[0]["creator"], "Alice");
    assert_eq!(value[0]["status"], "waiting");
}

#[tokio::test]
async fn test_ws_requires_upgrade() {
    let server = GameServer::new(ServerConfig::default()).expect("Valid config");
    let (status, _) = get(&server, "/ws").await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_static_files_served() {
    let dir = tempfile::tempdir().expect("Temp dir");
    std::fs::write(dir.path().join("index.html"), "<h1>Connect 4</h1>").expect("Write asset");
    let config = ServerConfig::default().with_static_dir(dir.path());
    let server = GameServer::new(config).expect("Valid config");

    let (status, body) = get(&server, "/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Connect 4</h1>");

    let (status, _) = get(&server, "/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_without_static_dir() {
    let server = GameServer::new(ServerConfig::default()).expect("Valid config");
    let (status, _) = get(&server, "/index.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let config = ServerConfig::default().with_channel_capacity(0);
    assert!(GameServer::new(config).is_err());
}

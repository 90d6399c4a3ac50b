use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use vestibule::client::{ApiError, Client, ClientConfig};

/// Stub remote API returning scripted statuses.
fn stub_app() -> Router {
    Router::new()
        .route("/status/401", any(|| async { StatusCode::UNAUTHORIZED }))
        .route("/status/403", any(|| async { StatusCode::FORBIDDEN }))
        .route("/status/500", any(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/status/404", any(|| async { StatusCode::NOT_FOUND }))
        .route("/status/418", any(|| async { StatusCode::IM_A_TEAPOT }))
        .route(
            "/bad",
            any(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"error_message": "bad input"})),
                )
            }),
        )
        .route("/bad-opaque", any(|| async { (StatusCode::BAD_REQUEST, "not json") }))
        .route("/ok", get(|| async { "hello" }))
        .route("/echo", post(|body: Bytes| async move { body }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        )
}

async fn spawn_stub() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, stub_app()).await {
            eprintln!("stub server task error: {e:?}");
        }
    });
    addr
}

async fn stub_client() -> Client {
    let addr = spawn_stub().await;
    Client::new(&format!("http://{addr}"), "admin", "secret").unwrap()
}

#[tokio::test]
async fn status_401_maps_to_not_authorized() {
    let c = stub_client().await;
    let err = c.get("/status/401").await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthorized), "{err}");
}

#[tokio::test]
async fn status_403_maps_to_forbidden() {
    let c = stub_client().await;
    let err = c.get("/status/403").await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden), "{err}");
}

#[tokio::test]
async fn status_500_maps_to_server_error() {
    let c = stub_client().await;
    let err = c.get("/status/500").await.unwrap_err();
    assert!(matches!(err, ApiError::ServerError), "{err}");
}

#[tokio::test]
async fn status_404_maps_to_not_found() {
    let c = stub_client().await;
    let err = c.get("/status/404").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound), "{err}");
}

#[tokio::test]
async fn status_400_decodes_error_message() {
    let c = stub_client().await;
    let err = c.get("/bad").await.unwrap_err();
    match err {
        ApiError::BadRequest(m) => assert_eq!(m, "bad input"),
        other => panic!("expected BadRequest, got {other}"),
    }
}

#[tokio::test]
async fn status_400_decode_failure_is_reported() {
    let c = stub_client().await;
    let err = c.get("/bad-opaque").await.unwrap_err();
    match err {
        ApiError::BadRequest(m) => assert!(m.contains("decode"), "{m}"),
        other => panic!("expected BadRequest, got {other}"),
    }
}

#[tokio::test]
async fn unmapped_status_is_unexpected() {
    let c = stub_client().await;
    let err = c.get("/status/418").await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus(418)), "{err}");
}

#[tokio::test]
async fn success_returns_body_unchanged() {
    let c = stub_client().await;
    let resp = c.get("/ok").await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "hello");
}

#[tokio::test]
async fn delete_maps_statuses_too() {
    let c = stub_client().await;
    let err = c.delete("/status/404").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound), "{err}");
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Entry {
    title: String,
    unread: bool,
    feed_id: i64,
}

#[tokio::test]
async fn json_payload_round_trips_through_echo() {
    let c = stub_client().await;
    let entry = Entry { title: "hello".into(), unread: true, feed_id: 3 };
    let resp = c.post("/echo", &entry).await.unwrap();
    let back: Entry = resp.json().await.unwrap();
    assert_eq!(back, entry);
}

#[tokio::test]
async fn raw_payload_is_sent_as_is() {
    let c = stub_client().await;
    let resp = c.post_file("/echo", b"\x00\x01binary".to_vec()).await.unwrap();
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"\x00\x01binary");
}

#[tokio::test]
async fn timeout_expiry_is_a_transport_failure() {
    let addr = spawn_stub().await;
    let cfg = ClientConfig { timeout: Duration::from_millis(200), ..Default::default() };
    let c = Client::with_config(&format!("http://{addr}"), "admin", "secret", cfg).unwrap();
    let err = c.get("/slow").await.unwrap_err();
    match err {
        ApiError::Transport(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("expected Transport, got {other}"),
    }
}

#[tokio::test]
async fn connection_refused_is_a_transport_failure() {
    // bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let c = Client::new(&format!("http://{addr}"), "admin", "secret").unwrap();
    let err = c.get("/ok").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err}");
}

#[tokio::test]
async fn trailing_slash_endpoint_reaches_same_routes() {
    let addr = spawn_stub().await;
    let c = Client::new(&format!("http://{addr}/"), "admin", "secret").unwrap();
    let resp = c.get("/ok").await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "hello");
}

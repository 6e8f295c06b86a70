//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use edge_router::config::{EdgeConfig, FallbackMode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral localhost port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a backend that describes every request it receives as JSON.
///
/// The status can be chosen per request with an `x-mock-status` header. The
/// response always carries `access-control-allow-origin: *` and
/// `x-backend: echo` so header merging can be observed.
pub async fn start_echo_backend() -> SocketAddr {
    serve(Router::new().fallback(echo)).await
}

async fn echo(request: Request<Body>) -> Response<Body> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    let status = parts
        .headers
        .get("x-mock-status")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let headers: BTreeMap<String, String> = parts
        .headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();

    let description = json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&bytes),
        "body_len": bytes.len(),
    });

    (
        status,
        [("access-control-allow-origin", "*"), ("x-backend", "echo")],
        Json(description),
    )
        .into_response()
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Router config pointing at `backend`.
pub fn config_for(backend: SocketAddr, mode: FallbackMode) -> EdgeConfig {
    let mut config = EdgeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.cors.allow_origin = "https://frontend.example.com".into();
    config.backend.origin = format!("http://{}", backend);
    config.fallback.mode = mode;
    config
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

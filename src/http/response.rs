//! Locally synthesized responses.
//!
//! Preflight, health, landing page, JSON not-found and error responses. Each
//! builder takes the CORS policy so no router-built response leaves without it.

use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Serialize;

use crate::error::EdgeError;
use crate::security::CorsPolicy;

/// Body of the health response.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub ok: bool,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
}

#[derive(Debug, Serialize)]
struct NotFoundBody<'a> {
    error: &'static str,
    path: &'a str,
}

/// Marks a response whose headers leave the server exactly as built: no
/// request-ID echo is added on the way out.
#[derive(Debug, Clone, Copy)]
pub struct Verbatim;

/// Tag `response` as [`Verbatim`].
pub fn verbatim(mut response: Response<Body>) -> Response<Body> {
    response.extensions_mut().insert(Verbatim);
    response
}

fn with_cors(mut response: Response<Body>, cors: &CorsPolicy) -> Response<Body> {
    cors.apply(response.headers_mut());
    response
}

/// 204, no body, headers are exactly the policy.
pub fn preflight(cors: &CorsPolicy) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    *response.headers_mut() = cors.to_header_map();
    verbatim(response)
}

/// 200 `{"ok":true,"ts":<now>}`.
pub fn health(cors: &CorsPolicy) -> Response<Body> {
    let body = HealthBody {
        ok: true,
        ts: chrono::Utc::now().timestamp_millis(),
    };
    with_cors((StatusCode::OK, Json(body)).into_response(), cors)
}

/// 404 `{"error":"Not Found","path":<path>}`.
pub fn not_found(path: &str, cors: &CorsPolicy) -> Response<Body> {
    let body = NotFoundBody {
        error: "Not Found",
        path,
    };
    with_cors((StatusCode::NOT_FOUND, Json(body)).into_response(), cors)
}

/// Small HTML page for `/` so the root of an API-only deployment is never a 404.
pub fn landing(health_path: Option<&str>, cors: &CorsPolicy) -> Response<Body> {
    let mut page = String::from(
        "<!doctype html><meta charset=\"utf-8\">\n<title>edge-router</title>\n<h1>edge-router is running</h1>\n",
    );
    if let Some(path) = health_path {
        page.push_str(&format!(
            "<p>Health check: <a href=\"{path}\">{path}</a></p>\n",
            path = path
        ));
    }
    with_cors((StatusCode::OK, Html(page)).into_response(), cors)
}

/// JSON error response for a request-time fault.
pub fn error(err: EdgeError, cors: &CorsPolicy) -> Response<Body> {
    with_cors(err.into_response(), cors)
}

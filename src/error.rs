//! Error types for the router.
//!
//! Request-time failures (`EdgeError`) turn into JSON error responses; the
//! router attaches the CORS policy before they leave. Construction failures
//! (`InitError`) are fatal at startup.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ValidationError;
use crate::http::upstream::UpstreamError;

/// Fault while handling a single request.
#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("cannot build upstream uri: {0}")]
    UpstreamUri(String),

    #[error("asset store failed: {0}")]
    Assets(#[from] AssetError),
}

impl EdgeError {
    /// Status code the client sees.
    pub fn status(&self) -> StatusCode {
        match self {
            EdgeError::Upstream(_) | EdgeError::UpstreamUri(_) => StatusCode::BAD_GATEWAY,
            EdgeError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            EdgeError::Body(_) => StatusCode::BAD_REQUEST,
            EdgeError::Assets(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Details stay in the logs; the client gets the canonical reason.
        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Error"),
        };
        (status, Json(body)).into_response()
    }
}

/// Failure while assembling the router from configuration.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("failed to build upstream client: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("fallback mode 'static' requires an asset store")]
    MissingAssets,
}

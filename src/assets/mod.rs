//! Static asset collaborator.
//!
//! # Responsibilities
//! - Answer any request the router does not claim, in `static` mode
//! - Serve files from a directory, `index.html` for directory paths
//!
//! # Design Decisions
//! - The router hands over the raw request and returns the store's response
//!   untouched; no CORS headers are forced onto static responses
//! - A missing file is an ordinary 404 response, not an `AssetError`

use std::path::Path;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use thiserror::Error;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// The store could not produce any response.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset store unavailable: {0}")]
    Unavailable(String),
}

/// Fetch-capable asset service.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn fetch(&self, request: Request<Body>) -> Result<Response<Body>, AssetError>;
}

/// Serves a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssets {
    service: ServeDir,
}

impl DirAssets {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        if !root.is_dir() {
            tracing::warn!(path = %root.display(), "Asset directory does not exist; every static lookup will 404");
        }
        let service = ServeDir::new(root).append_index_html_on_directories(true);
        Self { service }
    }
}

#[async_trait]
impl AssetStore for DirAssets {
    async fn fetch(&self, request: Request<Body>) -> Result<Response<Body>, AssetError> {
        match self.service.clone().oneshot(request).await {
            Ok(response) => Ok(response.map(Body::new)),
            Err(never) => match never {},
        }
    }
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (request ID, tracing)
//! - Serve on a listener until shutdown is signalled
//!
//! # Design Decisions
//! - The last header pass wraps the Router from outside, after axum has
//!   added its own framing headers
//! - `Verbatim` responses (preflight, static assets) get no request-ID echo

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_LENGTH, Request, Response, StatusCode},
    Router, ServiceExt,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::util::MapResponse;
use tower_http::trace::TraceLayer;

use crate::config::EdgeConfig;
use crate::error::InitError;
use crate::http::edge::EdgeRouter;
use crate::http::request::{
    propagate_request_id_layer, request_id, set_request_id_layer, X_REQUEST_ID,
};
use crate::http::response::Verbatim;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
}

/// The assembled service: the Axum router plus the final header pass.
pub type EdgeService = MapResponse<Router, fn(Response<Body>) -> Response<Body>>;

/// HTTP server hosting the edge router.
pub struct EdgeServer {
    router: Router,
    config: EdgeConfig,
}

impl EdgeServer {
    /// Create a server with the default upstream and asset store.
    pub fn new(config: EdgeConfig) -> Result<Self, InitError> {
        let edge = Arc::new(EdgeRouter::from_config(&config)?);
        Ok(Self::with_router(config, edge))
    }

    /// Create a server around an already-built router.
    pub fn with_router(config: EdgeConfig, edge: Arc<EdgeRouter>) -> Self {
        let router = Self::build_router(AppState { router: edge });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        // Outermost last: the ID must exist before the trace span is created.
        Router::new()
            .fallback(edge_handler)
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// The assembled service, for driving without a socket.
    pub fn into_service(self) -> EdgeService {
        MapResponse::new(
            self.router,
            finish_response as fn(Response<Body>) -> Response<Body>,
        )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = ?self.config.fallback.mode,
            "HTTP server starting"
        );

        let service = self.into_service();
        axum::serve(listener, ServiceExt::<Request<Body>>::into_make_service(service))
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    state.router.handle(request).await
}

fn finish_response(mut response: Response<Body>) -> Response<Body> {
    if response.status() == StatusCode::NO_CONTENT {
        response.headers_mut().remove(CONTENT_LENGTH);
    }
    if response.extensions().get::<Verbatim>().is_some() {
        response.headers_mut().remove(X_REQUEST_ID);
    }
    response
}

//! The edge router: one request in, one response out.
//!
//! `EdgeRouter::handle` never fails. Every fault becomes a JSON error
//! response carrying the CORS policy.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::assets::{AssetStore, DirAssets};
use crate::config::{EdgeConfig, FallbackMode};
use crate::error::{EdgeError, InitError};
use crate::http::proxy::{BackendOrigin, Proxy};
use crate::http::request::request_id;
use crate::http::response;
use crate::http::upstream::{ReqwestUpstream, Upstream};
use crate::observability::metrics;
use crate::routing::{RouteDecision, RouteTable};
use crate::security::CorsPolicy;

/// Stateless request router. Cheap to share behind an `Arc`.
pub struct EdgeRouter {
    routes: RouteTable,
    cors: CorsPolicy,
    proxy: Proxy,
    assets: Option<Arc<dyn AssetStore>>,
    health_path: Option<String>,
}

impl EdgeRouter {
    /// Build from configuration with explicit collaborators.
    ///
    /// `assets` is required in `static` mode and ignored otherwise.
    pub fn new(
        config: &EdgeConfig,
        upstream: Arc<dyn Upstream>,
        assets: Option<Arc<dyn AssetStore>>,
    ) -> Result<Self, InitError> {
        let routes = RouteTable::from_config(config);
        let assets = match routes.fallback_mode() {
            FallbackMode::Static => Some(assets.ok_or(InitError::MissingAssets)?),
            FallbackMode::NotFound => None,
        };

        let origin = BackendOrigin::parse(&config.backend.origin)?;
        tracing::info!(
            backend = %origin.authority(),
            mode = ?routes.fallback_mode(),
            api_prefix = %config.routes.api_prefix,
            "Edge router configured"
        );

        Ok(Self {
            cors: CorsPolicy::from_config(&config.cors)?,
            proxy: Proxy::new(upstream, origin, config.backend.max_body_bytes),
            health_path: config.routes.health_path().map(str::to_string),
            routes,
            assets,
        })
    }

    /// Build with the default collaborators: `reqwest` upstream, directory assets.
    pub fn from_config(config: &EdgeConfig) -> Result<Self, InitError> {
        let upstream: Arc<dyn Upstream> = Arc::new(ReqwestUpstream::new(&config.backend)?);
        let assets: Option<Arc<dyn AssetStore>> = match config.fallback.mode {
            FallbackMode::Static => Some(Arc::new(DirAssets::new(&config.fallback.assets_dir))),
            FallbackMode::NotFound => None,
        };
        Self::new(config, upstream, assets)
    }

    /// Classify and answer one request.
    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        let start = Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let request_id = request_id(&request).to_string();

        let decision = self.routes.classify(&method, &path);
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            route = %decision,
            "Routing request"
        );

        let response = match decision {
            RouteDecision::Preflight => response::preflight(&self.cors),
            RouteDecision::Health => response::health(&self.cors),
            RouteDecision::Landing => response::landing(self.health_path.as_deref(), &self.cors),
            RouteDecision::NotFound => response::not_found(&path, &self.cors),
            RouteDecision::ApiProxy => self
                .proxy
                .forward(request, &self.cors)
                .await
                .unwrap_or_else(|e| self.fail(&request_id, e)),
            RouteDecision::Static => match &self.assets {
                Some(assets) => assets
                    .fetch(request)
                    .await
                    .map(response::verbatim)
                    .unwrap_or_else(|e| self.fail(&request_id, e.into())),
                None => response::not_found(&path, &self.cors),
            },
        };

        metrics::record_request(decision.as_str(), &method, response.status().as_u16(), start);
        response
    }

    fn fail(&self, request_id: &str, err: EdgeError) -> Response<Body> {
        match &err {
            EdgeError::Upstream(_) | EdgeError::UpstreamUri(_) | EdgeError::Assets(_) => {
                tracing::error!(request_id = %request_id, error = %err, "Request failed");
            }
            EdgeError::BodyTooLarge { .. } | EdgeError::Body(_) => {
                tracing::warn!(request_id = %request_id, error = %err, "Rejected request body");
            }
        }
        response::error(err, &self.cors)
    }
}

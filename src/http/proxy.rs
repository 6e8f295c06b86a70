//! API proxy branch.
//!
//! # Responsibilities
//! - Rewrite scheme and authority to the backend origin; keep path and query
//! - Decide whether the body travels (bodyless method set)
//! - Relay the backend response with hop-by-hop headers removed and the CORS
//!   policy merged in
//!
//! # Design Decisions
//! - The inbound body is read fully (bounded) before the call
//! - The response body is never buffered; it streams through
//! - Backend status codes are relayed as-is, 4xx/5xx included

use std::str::FromStr;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_LENGTH;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{HeaderMap, Method, Request, Response, Uri};
use http_body_util::LengthLimitError;

use crate::config::validation::parse_backend_origin;
use crate::config::ValidationError;
use crate::error::EdgeError;
use crate::http::upstream::{OutboundRequest, Upstream};
use crate::security::headers::{outbound_headers, strip_hop_by_hop};
use crate::security::CorsPolicy;

/// Methods whose requests are forwarded without any body.
pub const BODYLESS_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];

/// Returns true if `method` never carries a body to the backend.
pub fn is_bodyless(method: &Method) -> bool {
    BODYLESS_METHODS.contains(method)
}

/// Scheme and authority of the backend.
#[derive(Debug, Clone)]
pub struct BackendOrigin {
    scheme: Scheme,
    authority: Authority,
}

impl BackendOrigin {
    /// Parse and validate an origin such as `https://api.example.com:8443`.
    pub fn parse(origin: &str) -> Result<Self, ValidationError> {
        let url = parse_backend_origin(origin)?;
        let invalid = |reason: String| ValidationError::BackendOrigin {
            origin: origin.to_string(),
            reason,
        };

        let host = url.host_str().unwrap_or_default();
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: Scheme::from_str(url.scheme()).map_err(|e| invalid(e.to_string()))?,
            authority: Authority::from_str(&authority).map_err(|e| invalid(e.to_string()))?,
        })
    }

    /// Same path and query, backend scheme and authority.
    pub fn rewrite(&self, uri: &Uri) -> Result<Uri, EdgeError> {
        let path_and_query = uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
            .map_err(|e| EdgeError::UpstreamUri(e.to_string()))
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }
}

/// Forwards API requests to one backend origin.
pub struct Proxy {
    upstream: Arc<dyn Upstream>,
    origin: BackendOrigin,
    max_body_bytes: usize,
}

impl Proxy {
    pub fn new(upstream: Arc<dyn Upstream>, origin: BackendOrigin, max_body_bytes: usize) -> Self {
        Self {
            upstream,
            origin,
            max_body_bytes,
        }
    }

    /// Build the outbound request for `request`.
    pub async fn prepare(&self, request: Request<Body>) -> Result<OutboundRequest, EdgeError> {
        let (parts, body) = request.into_parts();

        let uri = self.origin.rewrite(&parts.uri)?;
        let body = if is_bodyless(&parts.method) {
            None
        } else {
            Some(read_body(body, &parts.headers, self.max_body_bytes).await?)
        };

        Ok(OutboundRequest {
            method: parts.method,
            uri,
            headers: outbound_headers(&parts.headers),
            body,
        })
    }

    /// Forward `request` and relay the backend response with `cors` merged in.
    pub async fn forward(
        &self,
        request: Request<Body>,
        cors: &CorsPolicy,
    ) -> Result<Response<Body>, EdgeError> {
        let outbound = self.prepare(request).await?;

        tracing::debug!(
            method = %outbound.method,
            upstream = %outbound.uri,
            has_body = outbound.body.is_some(),
            "Forwarding to backend"
        );

        let response = self.upstream.send(outbound).await?;

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        cors.apply(&mut parts.headers);
        Ok(Response::from_parts(parts, body))
    }
}

async fn read_body(body: Body, headers: &HeaderMap, limit: usize) -> Result<Bytes, EdgeError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(EdgeError::BodyTooLarge { limit });
    }

    axum::body::to_bytes(body, limit).await.map_err(|e| {
        if exceeded_limit(&e) {
            EdgeError::BodyTooLarge { limit }
        } else {
            EdgeError::Body(e.to_string())
        }
    })
}

fn exceeded_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

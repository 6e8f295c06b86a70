//! Outbound transport to the backend origin.
//!
//! # Responsibilities
//! - Carry a fully-built `OutboundRequest` to the backend
//! - Hand the backend response back with its body still streaming
//!
//! # Design Decisions
//! - The transport is a trait so the router can be driven without a network
//! - Redirects are relayed to the client, never followed
//! - No retries here; one call per proxied request

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Response, Uri};
use thiserror::Error;

use crate::config::BackendConfig;

/// The request as it will be sent to the backend.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    /// `None` for bodyless methods: no body and no framing headers.
    pub body: Option<Bytes>,
}

/// Transport-level failure. HTTP error statuses are not errors.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    Url(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that can execute an outbound request.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<Response<Body>, UpstreamError>;
}

/// `reqwest`-backed transport (HTTP/1.1, HTTP/2, rustls).
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    client: reqwest::Client,
}

impl ReqwestUpstream {
    pub fn new(config: &BackendConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Upstream for ReqwestUpstream {
    async fn send(&self, request: OutboundRequest) -> Result<Response<Body>, UpstreamError> {
        let url = reqwest::Url::parse(&request.uri.to_string())
            .map_err(|e| UpstreamError::Url(e.to_string()))?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let upstream = builder.send().await?;

        let status = upstream.status();
        let headers = upstream.headers().clone();

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

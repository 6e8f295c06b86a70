//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check that header values and the backend origin are usable as-is
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::EdgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("cors.allow_origin must not be empty")]
    EmptyOrigin,

    #[error("cors.{field} is not a valid header value")]
    HeaderValue { field: &'static str },

    #[error("backend.origin '{origin}' is invalid: {reason}")]
    BackendOrigin { origin: String, reason: String },

    #[error("routes.{field} '{value}' must start with '/'")]
    RoutePath { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Check every semantic constraint and collect all violations.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.cors.allow_origin.trim().is_empty() {
        errors.push(ValidationError::EmptyOrigin);
    }
    for (field, value) in [
        ("allow_origin", &config.cors.allow_origin),
        ("allow_methods", &config.cors.allow_methods),
        ("allow_headers", &config.cors.allow_headers),
    ] {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::HeaderValue { field });
        }
    }

    if let Err(e) = parse_backend_origin(&config.backend.origin) {
        errors.push(e);
    }
    if config.backend.max_body_bytes == 0 {
        errors.push(ValidationError::Zero { field: "backend.max_body_bytes" });
    }
    if config.backend.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "backend.connect_timeout_secs" });
    }
    if config.backend.request_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "backend.request_timeout_secs" });
    }

    if let Some(path) = config.routes.health_path() {
        if !path.starts_with('/') {
            errors.push(ValidationError::RoutePath {
                field: "health_path",
                value: path.to_string(),
            });
        }
    }
    if !config.routes.api_prefix.starts_with('/') {
        errors.push(ValidationError::RoutePath {
            field: "api_prefix",
            value: config.routes.api_prefix.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a backend origin: absolute http(s) URL, host required, nothing past the authority.
pub fn parse_backend_origin(origin: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: &str| ValidationError::BackendOrigin {
        origin: origin.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(origin).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a path, query or fragment"));
    }
    Ok(url)
}

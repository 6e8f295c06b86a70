//! Cross-origin response policy.
//!
//! A fixed, ordered list of `access-control-*` headers. Every response the
//! router builds or relays from the backend gets the whole list, overwriting
//! whatever the backend set for the same names.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::config::{CorsConfig, ValidationError};

/// Immutable CORS header set, built once at startup.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl CorsPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &CorsConfig) -> Result<Self, ValidationError> {
        let value = |field: &'static str, raw: &str| {
            HeaderValue::from_str(raw).map_err(|_| ValidationError::HeaderValue { field })
        };

        let mut headers = vec![
            (ACCESS_CONTROL_ALLOW_ORIGIN, value("allow_origin", &config.allow_origin)?),
            (ACCESS_CONTROL_ALLOW_METHODS, value("allow_methods", &config.allow_methods)?),
            (ACCESS_CONTROL_ALLOW_HEADERS, value("allow_headers", &config.allow_headers)?),
        ];
        if config.allow_credentials {
            headers.push((ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true")));
        }

        Ok(Self { headers })
    }

    /// Overwrite every policy header in `headers`.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
    }

    /// A fresh header map holding only the policy.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        self.apply(&mut headers);
        headers
    }
}

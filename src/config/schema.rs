//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Cross-origin policy attached to router responses.
    pub cors: CorsConfig,

    /// Backend origin that `/api/` traffic is forwarded to.
    pub backend: BackendConfig,

    /// Health path and API prefix.
    pub routes: RoutesConfig,

    /// What happens to paths no other rule claims.
    pub fallback: FallbackConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// CORS header values, emitted verbatim.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Value of `access-control-allow-origin`.
    pub allow_origin: String,

    /// Value of `access-control-allow-methods`.
    pub allow_methods: String,

    /// Value of `access-control-allow-headers`.
    pub allow_headers: String,

    /// Whether `access-control-allow-credentials: true` is sent.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "https://regal-pudding-94ed42.netlify.app".to_string(),
            allow_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            allow_headers: "content-type, authorization".to_string(),
            allow_credentials: true,
        }
    }
}

/// Backend origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Absolute origin, scheme and authority only (e.g. "https://api.example.com").
    pub origin: String,

    /// Largest inbound body that will be forwarded, in bytes.
    pub max_body_bytes: usize,

    /// Transport connect timeout. Unset means the OS default applies.
    pub connect_timeout_secs: Option<u64>,

    /// Whole-request timeout on the upstream call. Unset means none.
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: "https://fahrtrainer-backend.onrender.com".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

/// Path rules used for classification.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Exact path answered locally with `{ok, ts}`. `None` or empty disables it.
    pub health_path: Option<String>,

    /// Path prefix forwarded to the backend.
    pub api_prefix: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            health_path: Some("/api/ping".to_string()),
            api_prefix: "/api/".to_string(),
        }
    }
}

impl RoutesConfig {
    /// The health path, treating an empty string as disabled.
    pub fn health_path(&self) -> Option<&str> {
        self.health_path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Deployment mode for unmatched paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackMode {
    /// Delegate to the static asset store.
    #[default]
    Static,
    /// Answer with a JSON 404.
    NotFound,
}

impl std::str::FromStr for FallbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(FallbackMode::Static),
            "not-found" | "not_found" | "notfound" => Ok(FallbackMode::NotFound),
            other => Err(format!("unknown fallback mode '{}'", other)),
        }
    }
}

/// Fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Which of the two deployment modes this router runs in.
    pub mode: FallbackMode,

    /// Directory served in `static` mode.
    pub assets_dir: String,

    /// Serve the HTML landing page at `/` in `not-found` mode.
    pub landing_page: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            mode: FallbackMode::Static,
            assets_dir: "public".to_string(),
            landing_page: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config: EdgeConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8787");
        assert_eq!(config.routes.health_path(), Some("/api/ping"));
        assert_eq!(config.routes.api_prefix, "/api/");
        assert_eq!(config.fallback.mode, FallbackMode::Static);
        assert!(config.cors.allow_credentials);
    }

    #[test]
    fn test_parse_not_found_mode() {
        let config: EdgeConfig = toml::from_str(
            r#"
            [fallback]
            mode = "not-found"
            landing_page = false

            [routes]
            health_path = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.fallback.mode, FallbackMode::NotFound);
        assert!(!config.fallback.landing_page);
        assert_eq!(config.routes.health_path(), None);
    }

    #[test]
    fn test_fallback_mode_from_str() {
        assert_eq!("static".parse::<FallbackMode>(), Ok(FallbackMode::Static));
        assert_eq!("Not-Found".parse::<FallbackMode>(), Ok(FallbackMode::NotFound));
        assert!("spa".parse::<FallbackMode>().is_err());
    }
}

//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "EDGE_ROUTER_";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: {reason}")]
    Env { var: String, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, override from the process environment, and validate.
///
/// With no path, the built-in defaults are the starting point.
pub fn load_config(path: Option<&Path>) -> Result<EdgeConfig, ConfigError> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// [`load_config`] with overrides taken from `lookup` instead of the process
/// environment.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<EdgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => EdgeConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `EDGE_ROUTER_*` overrides using the given lookup.
pub fn apply_env_overrides<F>(config: &mut EdgeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| lookup(&format!("{}{}", ENV_PREFIX, suffix));

    if let Some(v) = var("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = var("CORS_ORIGIN") {
        config.cors.allow_origin = v;
    }
    if let Some(v) = var("BACKEND_ORIGIN") {
        config.backend.origin = v;
    }
    if let Some(v) = var("FALLBACK_MODE") {
        config.fallback.mode = v.parse().map_err(|reason| ConfigError::Env {
            var: format!("{}FALLBACK_MODE", ENV_PREFIX),
            reason,
        })?;
    }
    if let Some(v) = var("ASSETS_DIR") {
        config.fallback.assets_dir = v;
    }
    if let Some(v) = var("LOG_LEVEL") {
        config.observability.log_level = v;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FallbackMode;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = EdgeConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("EDGE_ROUTER_CORS_ORIGIN", "https://app.example.com"),
                ("EDGE_ROUTER_BACKEND_ORIGIN", "http://10.0.0.5:3000"),
                ("EDGE_ROUTER_FALLBACK_MODE", "not-found"),
            ]),
        )
        .unwrap();

        assert_eq!(config.cors.allow_origin, "https://app.example.com");
        assert_eq!(config.backend.origin, "http://10.0.0.5:3000");
        assert_eq!(config.fallback.mode, FallbackMode::NotFound);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8787");
    }

    #[test]
    fn test_bad_mode_in_env_is_reported() {
        let mut config = EdgeConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("EDGE_ROUTER_FALLBACK_MODE", "spa")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { ref var, .. } if var == "EDGE_ROUTER_FALLBACK_MODE"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [backend]
            origin = "http://127.0.0.1:3000"
            "#
        )
        .unwrap();

        let config = load_config_with(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.backend.origin, "http://127.0.0.1:3000");
    }

    #[test]
    fn test_env_applies_on_top_of_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\norigin = \"http://127.0.0.1:3000\"").unwrap();

        let config = load_config_with(
            Some(file.path()),
            env(&[("EDGE_ROUTER_BACKEND_ORIGIN", "https://api.example.com")]),
        )
        .unwrap();
        assert_eq!(config.backend.origin, "https://api.example.com");
    }

    #[test]
    fn test_invalid_file_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\norigin = \"https://example.com/api\"").unwrap();

        let err = load_config_with(Some(file.path()), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: backend.origin"));
    }
}

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply EDGE_ROUTER_* overrides)
//!     → validation.rs (semantic checks)
//!     → EdgeConfig (validated, immutable)
//!     → handed to EdgeRouter / EdgeServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{
    BackendConfig, CorsConfig, EdgeConfig, FallbackConfig, FallbackMode, ListenerConfig,
    LogFormat, ObservabilityConfig, RoutesConfig,
};
pub use validation::ValidationError;

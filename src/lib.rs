//! Edge request router.
//!
//! Classifies each inbound request as preflight, health, API proxy, static
//! asset or not-found, and makes sure every router-built or proxied response
//! carries one fixed CORS policy.

pub mod assets;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::EdgeConfig;
pub use error::{EdgeError, InitError};
pub use http::{EdgeRouter, EdgeServer};
pub use lifecycle::Shutdown;

//! Route classification.
//!
//! # Responsibilities
//! - Store compiled matchers for each route class
//! - Classify a (method, path) pair into a `RouteDecision`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Fixed evaluation order: preflight, health, landing, API prefix, fallback
//! - Explicit NotFound rather than a silent default

use axum::http::Method;

use crate::config::{EdgeConfig, FallbackMode};
use crate::routing::matcher::{ExactPathMatcher, Matcher, MethodMatcher, PathPrefixMatcher};

/// Route class for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDecision {
    /// OPTIONS, answered with the CORS policy alone.
    Preflight,
    /// Local liveness answer.
    Health,
    /// HTML page at `/` in not-found mode.
    Landing,
    /// Forward to the backend origin.
    ApiProxy,
    /// Delegate to the asset store.
    Static,
    /// JSON 404.
    NotFound,
}

impl RouteDecision {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteDecision::Preflight => "preflight",
            RouteDecision::Health => "health",
            RouteDecision::Landing => "landing",
            RouteDecision::ApiProxy => "api-proxy",
            RouteDecision::Static => "static",
            RouteDecision::NotFound => "not-found",
        }
    }
}

impl std::fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled routing rules.
#[derive(Debug)]
pub struct RouteTable {
    preflight: MethodMatcher,
    health: Option<ExactPathMatcher>,
    landing: Option<ExactPathMatcher>,
    api: PathPrefixMatcher,
    fallback: FallbackMode,
}

impl RouteTable {
    /// Compile the table from configuration.
    pub fn from_config(config: &EdgeConfig) -> Self {
        let landing = (config.fallback.mode == FallbackMode::NotFound
            && config.fallback.landing_page)
            .then(|| ExactPathMatcher::new("/"));

        Self {
            preflight: MethodMatcher::new(Method::OPTIONS),
            health: config.routes.health_path().map(ExactPathMatcher::new),
            landing,
            api: PathPrefixMatcher::new(config.routes.api_prefix.clone()),
            fallback: config.fallback.mode,
        }
    }

    /// First match wins.
    pub fn classify(&self, method: &Method, path: &str) -> RouteDecision {
        if self.preflight.matches(method, path) {
            return RouteDecision::Preflight;
        }
        if self.health.as_ref().is_some_and(|m| m.matches(method, path)) {
            return RouteDecision::Health;
        }
        if self.landing.as_ref().is_some_and(|m| m.matches(method, path)) {
            return RouteDecision::Landing;
        }
        if self.api.matches(method, path) {
            return RouteDecision::ApiProxy;
        }
        match self.fallback {
            FallbackMode::Static => RouteDecision::Static,
            FallbackMode::NotFound => RouteDecision::NotFound,
        }
    }

    pub fn fallback_mode(&self) -> FallbackMode {
        self.fallback
    }
}

//! Route matching logic.
//!
//! # Responsibilities
//! - Match request method (exact)
//! - Match exact path (case-sensitive)
//! - Match path prefix (case-sensitive)
//!
//! # Design Decisions
//! - Path matching is case-sensitive and works on the raw, still-encoded path
//! - Query strings never take part in matching
//! - No regex to guarantee O(n) matching

use axum::http::Method;

/// Trait for matching a request's method and path against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, method: &Method, path: &str) -> bool;
}

/// Matches a single HTTP method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
}

impl MethodMatcher {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, method: &Method, _path: &str) -> bool {
        *method == self.method
    }
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, _method: &Method, path: &str) -> bool {
        path == self.path
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, _method: &Method, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

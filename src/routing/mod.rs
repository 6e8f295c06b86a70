//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered rule evaluation)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: RouteDecision
//!
//! Route Compilation (at startup):
//!     RoutesConfig + FallbackConfig
//!     → Compile matchers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (exact and prefix matching only)
//! - Deterministic: same input always yields the same decision
//! - First match wins

pub mod matcher;
pub mod router;

pub use router::{RouteDecision, RouteTable};

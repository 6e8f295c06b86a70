//! Header policy subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     → headers.rs (drop host/hop-by-hop before forwarding)
//!
//! Outbound response:
//!     → headers.rs (drop hop-by-hop from the backend response)
//!     → cors.rs (overwrite access-control-* headers)
//! ```
//!
//! # Design Decisions
//! - The CORS policy is fixed per deployment, never derived from the request
//! - Overwrite, never append: the backend cannot widen the policy

pub mod cors;
pub mod headers;

pub use cors::CorsPolicy;

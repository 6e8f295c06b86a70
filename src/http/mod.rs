//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID + trace layers)
//!     → edge.rs (classify via routing, dispatch)
//!         ├─ response.rs (preflight, health, landing, not-found, errors)
//!         ├─ proxy.rs → upstream.rs (backend call, CORS merge)
//!         └─ assets (static fallback)
//!     → Send to client
//! ```

pub mod edge;
pub mod proxy;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use edge::EdgeRouter;
pub use request::X_REQUEST_ID;
pub use server::{EdgeServer, EdgeService};
pub use upstream::{OutboundRequest, ReqwestUpstream, Upstream, UpstreamError};

//! Header filtering between client and backend.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers in both directions
//! - Drop `host` and `content-length` on the way out; the transport sets them
//!
//! Everything else, `authorization` included, is forwarded verbatim.

use axum::http::header::{CONTENT_LENGTH, HOST};
use axum::http::{HeaderMap, HeaderName};

/// Connection-scoped headers that never cross the proxy.
const HOP_BY_HOP: [&str; 7] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Returns true if `name` is connection-scoped.
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copy of the inbound headers suitable for the backend request.
pub fn outbound_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if name == HOST || name == CONTENT_LENGTH || is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// Remove hop-by-hop headers from a backend response in place.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

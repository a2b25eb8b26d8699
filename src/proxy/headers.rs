//! Response header policy.

use axum::http::{
    header::{CONNECTION, CONTENT_LENGTH, TRANSFER_ENCODING},
    HeaderMap, HeaderName,
};

/// Whether an upstream response header may be forwarded to the client.
///
/// Framing headers are dropped because the gateway re-frames the streamed
/// body, and `Access-Control-*` because the gateway owns its CORS policy.
pub fn is_forwardable(name: &HeaderName) -> bool {
    // HeaderName::as_str is always lowercase.
    let name = name.as_str();
    !(name == CONTENT_LENGTH.as_str()
        || name == TRANSFER_ENCODING.as_str()
        || name == CONNECTION.as_str()
        || name == "keep-alive"
        || name.starts_with("access-control"))
}

/// Copy all forwardable headers, preserving repeated values.
pub fn filter_upstream_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if is_forwardable(name) {
            forwarded.append(name.clone(), value.clone());
        }
    }
    forwarded
}

//! Response construction for the manifest redirect.

use axum::{
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::error::{GatewayError, Result};

/// `302 Found` pointing at the resolved external manifest URL.
///
/// The target embeds a short-lived token, so caches must not keep it.
pub fn manifest_redirect(location: &str) -> Result<Response> {
    let location = HeaderValue::from_str(location).map_err(|_| {
        GatewayError::MalformedUpstreamRedirect(format!("unusable redirect target {location:?}"))
    })?;

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, location),
            (CONTENT_TYPE, HeaderValue::from_static("text/html")),
            (CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
    )
        .into_response())
}

//! Route handlers.
//!
//! Handlers only extract path parameters and pick the route's base URL;
//! resolution and streaming live in `resolver` and `proxy`.

use axum::{
    extract::{Path, State},
    http::{header::HOST, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::error::GatewayError;
use crate::http::media_path::{self, MediaRequest};
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::proxy::MediaFile;

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `GET /live/manifest/{channel}.mpd`
pub async fn manifest_redirect(
    State(state): State<AppState>,
    Path(name): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let Some(MediaRequest {
        channel,
        file: MediaFile::Manifest,
    }) = media_path::parse(&name)
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let base = request_base_url(state.public_base_url.as_deref(), &uri, &headers);
    let resolved = state
        .resolver
        .resolve_manifest_redirect(&channel, &base)
        .await
        .and_then(|location| response::manifest_redirect(&location));

    match resolved {
        Ok(redirect) => {
            metrics::record_manifest("redirected");
            redirect
        }
        Err(e) => {
            metrics::record_manifest(manifest_outcome(&e));
            e.into_response()
        }
    }
}

/// `GET /live/{host}/{token}/{file}` for manifests and audio/video segments.
pub async fn media(
    State(state): State<AppState>,
    Path((host, token, name)): Path<(String, String, String)>,
) -> Response {
    let Some(request) = media_path::parse(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let response = match state
        .proxy
        .proxy(&host, &token, &request.channel, &request.file)
        .await
    {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };

    metrics::record_proxy(request.file.kind(), response.status().as_u16());
    response
}

fn manifest_outcome(error: &GatewayError) -> &'static str {
    match error {
        GatewayError::ChannelNotFound(_) => "not_found",
        GatewayError::MalformedUpstreamRedirect(_) => "bad_redirect",
        GatewayError::UpstreamUnavailable(_) | GatewayError::UpstreamTimeout(_) => "upstream_error",
        _ => "error",
    }
}

/// Base URL (with trailing `/`) that external manifest URLs are built on.
///
/// A configured public URL wins; otherwise it is taken from the request's
/// authority, honouring `X-Forwarded-Proto` from a fronting proxy.
pub fn request_base_url(public_base_url: Option<&str>, uri: &Uri, headers: &HeaderMap) -> String {
    if let Some(base) = public_base_url {
        return if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
    }

    let authority = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|p| matches!(*p, "http" | "https"))
        .unwrap_or("http");

    format!("{scheme}://{authority}/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_base_url() {
        let uri: Uri = "/live/manifest/X.mpd".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(request_base_url(None, &uri, &headers), "http://localhost/");

        headers.insert(HOST, HeaderValue::from_static("tv.example.org:8080"));
        assert_eq!(request_base_url(None, &uri, &headers), "http://tv.example.org:8080/");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(request_base_url(None, &uri, &headers), "https://tv.example.org:8080/");

        assert_eq!(
            request_base_url(Some("https://cdn.tv.example.org"), &uri, &headers),
            "https://cdn.tv.example.org/"
        );
    }
}

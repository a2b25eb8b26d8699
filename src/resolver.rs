//! Manifest redirect resolution.
//!
//! One manifest request walks `LOOKUP → PROBE → EXTRACT → RESPOND`:
//!
//! ```text
//! /live/manifest/ESPN2HD.mpd
//!     LOOKUP   directory: ESPN2HD → https://cdn.example.com/live/.../ESPN2HD.mpd
//!     PROBE    GET canonical url (fingerprint headers, redirects not followed)
//!     EXTRACT  Location: https://edge9.example.net/TKN999/live/.../ESPN2HD.mpd
//!              host = edge9.example.net, token = TKN999
//!     RESPOND  {base}live/{encode(host)}/TKN999/ESPN2HD.mpd
//! ```
//!
//! Nothing is cached: tokens are short-lived and the CDN may hand out a
//! different edge on every probe.

use std::sync::Arc;

use axum::http::header::LOCATION;

use crate::codec::{encode_host, validate_token};
use crate::directory::{self, ChannelDirectory};
use crate::error::{GatewayError, Result};
use crate::upstream::UpstreamClient;

/// The `{host, token}` pair carried by a CDN redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub host: String,
    pub token: String,
}

/// Split an absolute redirect URL into upstream host and access token.
///
/// `scheme://host/token/...`: the authority is the third `/`-delimited
/// segment and the token the fourth.
pub fn extract_redirect_target(location: &str) -> Result<RedirectTarget> {
    let segments: Vec<&str> = location.split('/').collect();
    if segments.len() < 4 {
        return Err(GatewayError::MalformedUpstreamRedirect(format!(
            "expected scheme://host/token/..., got {location:?}"
        )));
    }
    if !segments[0].ends_with(':') || !segments[1].is_empty() {
        return Err(GatewayError::MalformedUpstreamRedirect(format!(
            "location is not absolute: {location:?}"
        )));
    }

    let host = segments[2];
    let token = segments[3];
    if host.is_empty() || token.is_empty() {
        return Err(GatewayError::MalformedUpstreamRedirect(format!(
            "missing host or token in {location:?}"
        )));
    }
    validate_token(token).map_err(|_| {
        GatewayError::MalformedUpstreamRedirect(format!("unusable token in {location:?}"))
    })?;

    Ok(RedirectTarget {
        host: host.to_string(),
        token: token.to_string(),
    })
}

/// Compose the outward-facing manifest URL.
///
/// `request_base_url` is expected to end with `/`; one is added if missing.
pub fn external_manifest_url(request_base_url: &str, target: &RedirectTarget, channel: &str) -> String {
    let separator = if request_base_url.ends_with('/') { "" } else { "/" };
    format!(
        "{request_base_url}{separator}live/{}/{}/{channel}.mpd",
        encode_host(&target.host),
        target.token
    )
}

/// Resolves channel codes to externally exposed, token-bearing manifest URLs.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    directory: Arc<dyn ChannelDirectory>,
    upstream: UpstreamClient,
}

impl RedirectResolver {
    pub fn new(directory: Arc<dyn ChannelDirectory>, upstream: UpstreamClient) -> Self {
        Self { directory, upstream }
    }

    /// Resolve `channel` into the URL the client should be redirected to.
    pub async fn resolve_manifest_redirect(&self, channel: &str, request_base_url: &str) -> Result<String> {
        let entry = directory::lookup(&self.directory, channel)
            .await?
            .ok_or_else(|| GatewayError::ChannelNotFound(channel.to_string()))?;

        tracing::debug!(channel = %channel, upstream_url = %entry.upstream_url, "Probing upstream");
        let response = self.upstream.get(&entry.upstream_url, "probe").await?;

        let location = response
            .headers()
            .get(LOCATION)
            .ok_or_else(|| {
                GatewayError::MalformedUpstreamRedirect(format!(
                    "probe returned {} without Location",
                    response.status()
                ))
            })?
            .to_str()
            .map_err(|_| GatewayError::MalformedUpstreamRedirect("non-ascii Location".into()))?;

        let target = extract_redirect_target(location)?;
        let external = external_manifest_url(request_base_url, &target, &entry.code);

        tracing::info!(
            channel = %channel,
            upstream_host = %target.host,
            "Manifest redirect resolved"
        );
        Ok(external)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_host;

    #[test]
    fn test_extract_redirect_target() {
        let target =
            extract_redirect_target("https://cdn7.example.com/abcTOKEN123/path/Channel.mpd").unwrap();
        assert_eq!(target.host, "cdn7.example.com");
        assert_eq!(target.token, "abcTOKEN123");

        let minimal = extract_redirect_target("http://127.0.0.1:9000/tok").unwrap();
        assert_eq!(minimal.host, "127.0.0.1:9000");
        assert_eq!(minimal.token, "tok");
    }

    #[test]
    fn test_extract_rejects_malformed() {
        for location in [
            "",
            "https://cdn7.example.com",
            "https://cdn7.example.com/",
            "/relative/path/file.mpd",
            "https:///token/file.mpd",
            "https://cdn7.example.com/tok?x=1/file.mpd",
        ] {
            assert!(
                matches!(
                    extract_redirect_target(location),
                    Err(GatewayError::MalformedUpstreamRedirect(_))
                ),
                "accepted {location:?}"
            );
        }
    }

    #[test]
    fn test_external_manifest_url() {
        let target = RedirectTarget {
            host: "edge9.example.net".into(),
            token: "TKN999".into(),
        };
        let url = external_manifest_url("http://localhost:8080/", &target, "ESPN2HD");
        assert_eq!(
            url,
            format!("http://localhost:8080/live/{}/TKN999/ESPN2HD.mpd", encode_host("edge9.example.net"))
        );
        assert_eq!(url, external_manifest_url("http://localhost:8080", &target, "ESPN2HD"));

        let encoded = url.split('/').nth(4).unwrap();
        assert_eq!(decode_host(encoded).unwrap(), "edge9.example.net");
    }
}

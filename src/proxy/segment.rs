//! Manifest and media segment proxying.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::Response,
};

use crate::codec::{decode_host, validate_token};
use crate::directory::{self, ChannelDirectory};
use crate::error::{GatewayError, Result};
use crate::proxy::body::with_idle_timeout;
use crate::proxy::headers::filter_upstream_headers;
use crate::upstream::{upstream_media_url, UpstreamClient};

/// A file under a channel's upstream directory.
///
/// Naming follows the CDN's fixed conventions:
/// `{channel}.mpd`, `{channel}-mp4a_{file}.mp4`, `{channel}-avc1_{file}.mp4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaFile {
    Manifest,
    Audio(String),
    Video(String),
}

impl MediaFile {
    /// Upstream file name for `channel`.
    pub fn file_name(&self, channel: &str) -> String {
        match self {
            MediaFile::Manifest => format!("{channel}.mpd"),
            MediaFile::Audio(file) => format!("{channel}-mp4a_{file}.mp4"),
            MediaFile::Video(file) => format!("{channel}-avc1_{file}.mp4"),
        }
    }

    /// Content type applied when upstream does not send one.
    pub fn content_type(&self) -> &'static str {
        match self {
            MediaFile::Manifest => "application/dash+xml",
            MediaFile::Audio(_) => "audio/mp4",
            MediaFile::Video(_) => "video/mp4",
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            MediaFile::Manifest => "manifest",
            MediaFile::Audio(_) => "audio",
            MediaFile::Video(_) => "video",
        }
    }
}

/// Streams manifests and segments from the resolved CDN edge.
#[derive(Debug, Clone)]
pub struct SegmentProxy {
    directory: Arc<dyn ChannelDirectory>,
    upstream: UpstreamClient,
}

impl SegmentProxy {
    pub fn new(directory: Arc<dyn ChannelDirectory>, upstream: UpstreamClient) -> Self {
        Self { directory, upstream }
    }

    /// Rebuild the true upstream URL from an external address.
    pub async fn upstream_url(
        &self,
        opaque_host: &str,
        token: &str,
        channel: &str,
        file: &MediaFile,
    ) -> Result<String> {
        let host = decode_host(opaque_host)?;
        validate_token(token)?;

        let entry = directory::lookup(&self.directory, channel)
            .await?
            .ok_or_else(|| GatewayError::ChannelNotFound(channel.to_string()))?;

        upstream_media_url(
            self.upstream.scheme(),
            &host,
            token,
            &entry.upstream_url,
            &file.file_name(&entry.code),
        )
    }

    /// Fetch one file upstream and stream it back.
    ///
    /// Only an upstream 200 produces a body; any other status is mirrored
    /// to the client without one.
    pub async fn proxy(
        &self,
        opaque_host: &str,
        token: &str,
        channel: &str,
        file: &MediaFile,
    ) -> Result<Response> {
        let url = self.upstream_url(opaque_host, token, channel, file).await?;
        tracing::debug!(channel = %channel, kind = file.kind(), url = %url, "Proxying upstream file");

        let upstream = self.upstream.get(&url, file.kind()).await?;
        let status = upstream.status();
        if status != StatusCode::OK {
            return Err(GatewayError::UpstreamStatus(status));
        }

        let mut headers = filter_upstream_headers(upstream.headers());
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(file.content_type()));
        }

        let body = Body::from_stream(with_idle_timeout(
            upstream.bytes_stream(),
            self.upstream.idle_timeout(),
        ));

        let mut response = Response::new(body);
        *response.headers_mut() = headers;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_host;
    use crate::config::UpstreamConfig;
    use crate::directory::{Channel, MemoryDirectory};

    fn proxy() -> SegmentProxy {
        let directory: Arc<dyn ChannelDirectory> = Arc::new(MemoryDirectory::from_channels([
            Channel::new("ESPN2HD", "https://cdn.example.com/live/c3eds/ESPN2HD/x/ESPN2HD.mpd"),
        ]));
        let upstream = UpstreamClient::new(&UpstreamConfig::default()).unwrap();
        SegmentProxy::new(directory, upstream)
    }

    #[test]
    fn test_media_file_names() {
        assert_eq!(MediaFile::Manifest.file_name("ESPN2HD"), "ESPN2HD.mpd");
        assert_eq!(
            MediaFile::Audio("t123".into()).file_name("ESPN2HD"),
            "ESPN2HD-mp4a_t123.mp4"
        );
        assert_eq!(
            MediaFile::Video("t123".into()).file_name("ESPN2HD"),
            "ESPN2HD-avc1_t123.mp4"
        );
    }

    #[tokio::test]
    async fn test_upstream_url_reconstruction() {
        let proxy = proxy();
        let host = encode_host("edge9.example.net");

        let manifest = proxy
            .upstream_url(&host, "TKN999", "ESPN2HD", &MediaFile::Manifest)
            .await
            .unwrap();
        assert_eq!(manifest, "https://edge9.example.net/TKN999/live/c3eds/ESPN2HD/x/ESPN2HD.mpd");

        let video = proxy
            .upstream_url(&host, "TKN999", "ESPN2HD", &MediaFile::Video("42".into()))
            .await
            .unwrap();
        assert_eq!(
            video,
            "https://edge9.example.net/TKN999/live/c3eds/ESPN2HD/x/ESPN2HD-avc1_42.mp4"
        );
    }

    #[tokio::test]
    async fn test_upstream_url_errors() {
        let proxy = proxy();
        let host = encode_host("edge9.example.net");

        assert!(matches!(
            proxy.upstream_url("%%%", "TKN", "ESPN2HD", &MediaFile::Manifest).await,
            Err(GatewayError::MalformedAddress(_))
        ));
        assert!(matches!(
            proxy.upstream_url(&host, "", "ESPN2HD", &MediaFile::Manifest).await,
            Err(GatewayError::MalformedAddress(_))
        ));
        assert!(matches!(
            proxy.upstream_url(&host, "TKN", "NOPE", &MediaFile::Manifest).await,
            Err(GatewayError::ChannelNotFound(_))
        ));
    }
}

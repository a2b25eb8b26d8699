//! Gateway error taxonomy.
//!
//! Every failure on a request path ends up as a [`GatewayError`] and is
//! converted to an HTTP status at the handler boundary. Nothing here panics
//! the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::directory::DirectoryError;

/// Result alias used across the request path.
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The channel code has no directory entry.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// The redirect probe did not yield a usable `Location`.
    #[error("malformed upstream redirect: {0}")]
    MalformedUpstreamRedirect(String),

    /// A stored canonical URL could not be parsed.
    #[error("invalid upstream url {url:?}: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    /// The opaque host segment (or token) of an external URL is not valid codec output.
    #[error("malformed address: {0}")]
    MalformedAddress(String),

    /// Upstream answered with something other than 200 while proxying.
    #[error("upstream responded with {0}")]
    UpstreamStatus(StatusCode),

    /// Connecting to or talking with the upstream failed.
    #[error("upstream request failed: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// Upstream did not send response headers in time.
    #[error("upstream did not respond within {0:?}")]
    UpstreamTimeout(std::time::Duration),

    #[error("channel directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// The shared upstream client could not be built from configuration.
    #[error("upstream client setup failed: {0}")]
    ClientSetup(String),
}

impl GatewayError {
    /// Status code presented to the client for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::ChannelNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::MalformedAddress(_) => StatusCode::BAD_REQUEST,
            GatewayError::MalformedUpstreamRedirect(_) => StatusCode::BAD_GATEWAY,
            GatewayError::InvalidUpstreamUrl { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::UpstreamStatus(status) => *status,
            GatewayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Directory(_) | GatewayError::ClientSetup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            GatewayError::ChannelNotFound(channel) => {
                tracing::warn!(channel = %channel, "Channel not found");
            }
            GatewayError::MalformedAddress(_) => {
                tracing::warn!(error = %self, "Rejected external address");
            }
            GatewayError::UpstreamStatus(_) => {
                tracing::warn!(status = %status, "Upstream refused request");
            }
            _ => {
                tracing::error!(error = %self, status = %status, "Request failed");
            }
        }

        match self {
            // Upstream and internal failures never echo upstream addresses.
            GatewayError::ChannelNotFound(_) | GatewayError::MalformedAddress(_) => {
                (status, self.to_string()).into_response()
            }
            _ => status.into_response(),
        }
    }
}

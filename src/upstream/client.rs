//! Shared upstream HTTP client.

use std::time::{Duration, Instant};

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, Result};
use crate::observability::metrics;

/// Header the CDN uses, together with `User-Agent`, to gate access.
pub const X_FLOW_ORIGIN: HeaderName = HeaderName::from_static("x-flow-origin");

/// Process-wide upstream client.
///
/// Cloning is cheap: the connection pool lives behind an `Arc` inside
/// `reqwest::Client`, and nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    scheme: String,
    response_timeout: Duration,
    idle_timeout: Duration,
}

impl UpstreamClient {
    /// Build the client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        headers.insert(X_FLOW_ORIGIN, header_value(&config.flow_origin)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::none())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build()
            .map_err(|e| GatewayError::ClientSetup(e.to_string()))?;

        tracing::debug!(
            scheme = %config.scheme,
            connect_timeout_secs = config.connect_timeout_secs,
            response_timeout_secs = config.response_timeout_secs,
            idle_timeout_secs = config.idle_timeout_secs,
            "Upstream client ready"
        );

        Ok(Self {
            http,
            scheme: config.scheme.clone(),
            response_timeout: Duration::from_secs(config.response_timeout_secs),
            idle_timeout: Duration::from_secs(config.idle_timeout_secs),
        })
    }

    /// Issue one GET and wait (bounded) for the response head.
    ///
    /// The body is left unread; the caller decides whether to stream it.
    pub async fn get(&self, url: &str, kind: &'static str) -> Result<reqwest::Response> {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.response_timeout, self.http.get(url).send()).await;
        metrics::record_upstream(kind, started);

        let response = outcome.map_err(|_| GatewayError::UpstreamTimeout(self.response_timeout))??;
        Ok(response)
    }

    /// Scheme used to reach decoded CDN hosts.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Longest allowed silence between two body chunks.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| GatewayError::ClientSetup(format!("invalid header value {value:?}")))
}

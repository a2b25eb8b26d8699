//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every section
//! has defaults, so an empty file yields a working gateway.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, TLS, public URL).
    pub listener: ListenerConfig,

    /// Upstream CDN client settings.
    pub upstream: UpstreamConfig,

    /// Where channel definitions come from.
    pub directory: DirectoryConfig,

    /// Inbound request timeouts.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Externally visible base URL used in manifest redirects
    /// (e.g., "https://tv.example.org/"). Derived from the request's `Host`
    /// header when unset, which is unchecked client input; set it when
    /// responses pass through a shared cache.
    pub public_base_url: Option<String>,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            public_base_url: None,
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Upstream CDN client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme used to reach the decoded CDN host ("https" or "http").
    pub scheme: String,

    /// `User-Agent` sent on every upstream request.
    pub user_agent: String,

    /// `X-Flow-Origin` sent on every upstream request.
    pub flow_origin: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Time allowed for upstream response headers in seconds.
    pub response_timeout_secs: u64,

    /// Maximum gap between two body chunks in seconds.
    pub idle_timeout_secs: u64,

    /// Idle pooled connections kept per CDN host.
    pub pool_idle_per_host: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            user_agent: "okhttp/4.12.0".to_string(),
            flow_origin: "AndroidTV".to_string(),
            connect_timeout_secs: 5,
            response_timeout_secs: 10,
            idle_timeout_secs: 30,
            pool_idle_per_host: 32,
        }
    }
}

/// Channel directory backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    Sqlite,
    Memory,
}

/// Channel directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub backend: DirectoryBackend,

    /// SQLite database file (sqlite backend).
    pub sqlite_path: String,

    /// Channels served by the memory backend.
    pub channels: Vec<ChannelEntry>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: DirectoryBackend::Sqlite,
            sqlite_path: "channels.db".to_string(),
            channels: Vec::new(),
        }
    }
}

/// A channel declared inline in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelEntry {
    pub code: String,
    pub upstream_url: String,
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Time allowed to produce a response head, in seconds. Streaming bodies
    /// are not covered; they are bounded by the upstream idle timeout.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

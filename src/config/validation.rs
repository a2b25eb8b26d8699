//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics. All problems are
//! collected and returned together rather than stopping at the first.

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::{DirectoryBackend, GatewayConfig};
use crate::upstream::directory_prefix;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a socket address: {:?}", config.listener.bind_address),
        ));
    }

    if let Some(base) = &config.listener.public_base_url {
        match Url::parse(base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::new(
                "listener.public_base_url",
                format!("not an absolute http(s) url: {base:?}"),
            )),
        }
    }

    let upstream = &config.upstream;
    if !matches!(upstream.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::new(
            "upstream.scheme",
            format!("must be \"http\" or \"https\", got {:?}", upstream.scheme),
        ));
    }
    for (field, value) in [
        ("upstream.user_agent", &upstream.user_agent),
        ("upstream.flow_origin", &upstream.flow_origin),
    ] {
        if value.is_empty() || HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::new(field, "must be a non-empty header value"));
        }
    }
    for (field, value) in [
        ("upstream.connect_timeout_secs", upstream.connect_timeout_secs),
        ("upstream.response_timeout_secs", upstream.response_timeout_secs),
        ("upstream.idle_timeout_secs", upstream.idle_timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(field, "must be greater than zero"));
        }
    }

    let directory = &config.directory;
    match directory.backend {
        DirectoryBackend::Sqlite if directory.sqlite_path.trim().is_empty() => {
            errors.push(ValidationError::new(
                "directory.sqlite_path",
                "required for the sqlite backend",
            ));
        }
        _ => {}
    }

    let mut seen = HashSet::new();
    for (i, channel) in directory.channels.iter().enumerate() {
        let field = format!("directory.channels[{i}]");
        if channel.code.is_empty() {
            errors.push(ValidationError::new(&field, "code must not be empty"));
        } else if !seen.insert(channel.code.as_str()) {
            errors.push(ValidationError::new(
                &field,
                format!("duplicate code {:?}", channel.code),
            ));
        }
        if let Err(e) = directory_prefix(&channel.upstream_url) {
            errors.push(ValidationError::new(&field, e.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

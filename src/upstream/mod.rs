//! Upstream (CDN) access.
//!
//! # Responsibilities
//! - Derive the per-channel directory prefix from the canonical URL
//! - Hold the single shared HTTP client used for probes and media fetches
//! - Stamp every request with the client fingerprint the CDN expects
//!
//! # Design Decisions
//! - One pooled client per process, configured once and never mutated
//! - Redirects are never followed; the resolver needs the raw `Location`
//! - Waiting for headers is bounded; body chunks are bounded by the proxy

pub mod client;
pub mod path;

pub use client::UpstreamClient;
pub use path::{directory_prefix, upstream_media_url};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request path produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!     → spans.rs (one span per inbound request, keyed by request id)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for log shipping)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every log line through the request span
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
pub mod spans;

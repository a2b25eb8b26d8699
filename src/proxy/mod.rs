//! Segment proxy subsystem.
//!
//! # Data Flow
//! ```text
//! /live/{host}/{token}/{file}
//!     → codec decode host, validate token
//!     → directory lookup → directory prefix of canonical url
//!     → https://{host}/{token}{prefix}{file}
//!     → segment.rs: one upstream GET
//!     → headers.rs: drop framing + CORS headers
//!     → body.rs: stream chunks through, bounded by an idle timeout
//!     → client
//! ```
//!
//! # Design Decisions
//! - Bodies are never buffered; hyper only polls upstream when the client
//!   has room, so a slow client slows the upstream read
//! - Dropping the response body (client gone) drops the upstream stream,
//!   which aborts the upstream request
//! - A failure after the head has been sent aborts the client connection
//!   instead of ending the body cleanly

pub mod body;
pub mod headers;
pub mod segment;

pub use headers::filter_upstream_headers;
pub use segment::{MediaFile, SegmentProxy};

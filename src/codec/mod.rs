//! Addressing scheme for outward-facing URLs.
//!
//! # Data Flow
//! ```text
//! Location: https://edge9.example.net/TKN999/live/...
//!     → resolver extracts {host, token}
//!     → address.rs encodes host into a path-safe segment
//!     → /live/{encoded-host}/{token}/{channel}.mpd
//!
//! On every media request:
//!     {encoded-host} → address.rs decode → upstream authority
//! ```
//!
//! # Design Decisions
//! - Tokens are carried verbatim; they already arrive URL-safe
//! - Hosts are never trusted after decoding: they must parse as an authority

pub mod address;

pub use address::{decode_host, encode_host, validate_token};

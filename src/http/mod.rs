//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request id)
//!     → handlers.rs
//!         /live/manifest/{channel}.mpd   → resolver → response.rs (302)
//!         /live/{host}/{token}/{file}    → media_path.rs → proxy (stream)
//!     → Send to client
//! ```

pub mod handlers;
pub mod media_path;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};

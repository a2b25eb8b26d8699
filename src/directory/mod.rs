//! Channel directory.
//!
//! # Data Flow
//! ```text
//! channel code (from URL)
//!     → lookup() on tokio's blocking pool
//!     → ChannelDirectory::find_by_code
//!         memory.rs  (HashMap, fixtures and static deployments)
//!         sqlite.rs  (persistent store, managed by channel-cli)
//!     → Channel { code, upstream_url }
//! ```
//!
//! # Design Decisions
//! - Read-only from the request path; writes only happen through the CLI
//! - Synchronous trait so storage engines stay simple; async callers go
//!   through `lookup` and never block the scheduler

pub mod memory;
pub mod migrations;
pub mod sqlite;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryDirectory;
pub use sqlite::SqliteDirectory;

/// A live channel and the canonical CDN manifest URL behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub code: String,
    pub upstream_url: String,
}

impl Channel {
    pub fn new(code: impl Into<String>, upstream_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            upstream_url: upstream_url.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("migration {version} failed: {reason}")]
    Migration { version: usize, reason: String },

    #[error("directory lookup task failed: {0}")]
    Task(String),
}

/// Lookup from channel code to channel.
pub trait ChannelDirectory: Send + Sync + std::fmt::Debug {
    /// Returns `Ok(None)` when the code is unknown.
    fn find_by_code(&self, code: &str) -> Result<Option<Channel>, DirectoryError>;
}

/// Run a directory lookup off the async scheduler.
pub async fn lookup(
    directory: &Arc<dyn ChannelDirectory>,
    code: &str,
) -> Result<Option<Channel>, DirectoryError> {
    let directory = Arc::clone(directory);
    let code = code.to_owned();
    tokio::task::spawn_blocking(move || directory.find_by_code(&code))
        .await
        .map_err(|e| DirectoryError::Task(e.to_string()))?
}

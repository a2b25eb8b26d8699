//! Startup orchestration.

use std::sync::Arc;

use crate::config::{DirectoryBackend, DirectoryConfig};
use crate::directory::{Channel, ChannelDirectory, DirectoryError, MemoryDirectory, SqliteDirectory};

/// Open the configured channel directory.
pub fn open_directory(config: &DirectoryConfig) -> Result<Arc<dyn ChannelDirectory>, DirectoryError> {
    match config.backend {
        DirectoryBackend::Sqlite => {
            let directory = SqliteDirectory::open(&config.sqlite_path)?;
            tracing::info!(path = %config.sqlite_path, "Channel directory opened (sqlite)");
            Ok(Arc::new(directory))
        }
        DirectoryBackend::Memory => {
            let directory = MemoryDirectory::from_channels(
                config
                    .channels
                    .iter()
                    .map(|c| Channel::new(c.code.clone(), c.upstream_url.clone())),
            );
            tracing::info!(channels = directory.len(), "Channel directory loaded (memory)");
            Ok(Arc::new(directory))
        }
    }
}

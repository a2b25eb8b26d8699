//! In-memory channel directory.

use std::collections::HashMap;

use super::{Channel, ChannelDirectory, DirectoryError};

#[derive(Debug, Default, Clone)]
pub struct MemoryDirectory {
    channels: HashMap<String, Channel>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of channels; later duplicates replace earlier ones.
    pub fn from_channels(channels: impl IntoIterator<Item = Channel>) -> Self {
        let mut directory = Self::new();
        for channel in channels {
            directory.insert(channel);
        }
        directory
    }

    pub fn insert(&mut self, channel: Channel) {
        self.channels.insert(channel.code.clone(), channel);
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl ChannelDirectory for MemoryDirectory {
    fn find_by_code(&self, code: &str) -> Result<Option<Channel>, DirectoryError> {
        Ok(self.channels.get(code).cloned())
    }
}

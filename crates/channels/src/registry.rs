use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    plugin::ChannelAccounts,
};

/// Registry of all known channels.
pub struct ChannelRegistry {
    channels: HashMap<String, Box<dyn ChannelAccounts>>,
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    pub fn register(&mut self, channel: Box<dyn ChannelAccounts>) {
        self.channels.insert(channel.id().to_string(), channel);
    }

    pub fn get(&self, id: &str) -> Option<&dyn ChannelAccounts> {
        self.channels.get(id).map(|c| c.as_ref())
    }

    /// Like [`get`](Self::get), but reports unknown channels as an error.
    pub fn require(&self, id: &str) -> Result<&dyn ChannelAccounts> {
        self.get(id)
            .ok_or_else(|| Error::unavailable(format!("unknown channel: {id}")))
    }

    /// Registered channel IDs, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.channels.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Registered channels, sorted by ID.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ChannelAccounts> {
        self.list().into_iter().filter_map(move |id| self.get(id))
    }
}

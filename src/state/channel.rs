//! Per-channel topic cache.
//!
//! Entries are created lazily the first time an event mentions a channel and
//! live as long as the enforcer. Keys are casemapped so `#Rust` and `#rust`
//! share one entry.

use slirc_proto::irc_to_lower;
use std::collections::HashMap;

/// Cached state for one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelState {
    /// Last accepted topic. Never holds a rejected or reverted value.
    pub topic: String,
    /// Mandatory topic prefix, fixed when the entry is created.
    pub topic_prefix: String,
}

/// Owned by the enforcer and only ever touched from its task.
#[derive(Debug, Clone, Default)]
pub struct ChannelStateStore {
    default_prefix: String,
    prefix_overrides: HashMap<String, String>,
    channels: HashMap<String, ChannelState>,
}

impl ChannelStateStore {
    /// `overrides` maps channel names to a prefix that replaces `default_prefix`.
    pub fn new(default_prefix: impl Into<String>, overrides: HashMap<String, String>) -> Self {
        Self {
            default_prefix: default_prefix.into(),
            prefix_overrides: overrides
                .into_iter()
                .map(|(name, prefix)| (irc_to_lower(&name), prefix))
                .collect(),
            channels: HashMap::new(),
        }
    }

    /// Get or create the entry for `channel`.
    pub fn observe(&mut self, channel: &str) -> &mut ChannelState {
        let key = irc_to_lower(channel);
        let prefix = self
            .prefix_overrides
            .get(&key)
            .unwrap_or(&self.default_prefix)
            .clone();
        self.channels.entry(key).or_insert_with(|| ChannelState {
            topic: String::new(),
            topic_prefix: prefix,
        })
    }

    /// Hydrate the cache from the post-join topic handshake.
    pub fn sync_topic(&mut self, channel: &str, topic: &str) {
        self.observe(channel).topic = topic.to_string();
    }

    /// Cached topic, or `""` for a channel never seen.
    pub fn get_topic(&self, channel: &str) -> &str {
        self.channels
            .get(&irc_to_lower(channel))
            .map_or("", |state| state.topic.as_str())
    }

    /// Record a user topic change that passed every check.
    pub fn accept_topic(&mut self, channel: &str, text: &str) {
        self.observe(channel).topic = text.to_string();
    }

    pub fn topic_prefix(&self, channel: &str) -> &str {
        let key = irc_to_lower(channel);
        match self.channels.get(&key) {
            Some(state) => &state.topic_prefix,
            None => self.prefix_overrides.get(&key).unwrap_or(&self.default_prefix),
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

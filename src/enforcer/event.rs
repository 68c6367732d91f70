//! Typed events delivered by the dispatcher.

use slirc_proto::{Hostmask, ModeDelta};

/// One observed channel event. Every variant carries the raw channel name
/// and, where the event is attributable, the acting user's hostmask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A user joined a channel.
    Join { channel: String, actor: Hostmask },
    /// A user changed the topic.
    Topic {
        channel: String,
        actor: Hostmask,
        topic: String,
    },
    /// Topic reported by the server right after the bot joined (RPL_TOPIC).
    TopicSync { channel: String, topic: String },
    /// A user kicked one or more nicks.
    Kick {
        channel: String,
        actor: Hostmask,
        kicked: Vec<String>,
    },
    /// A user changed channel modes.
    ModeChange {
        channel: String,
        actor: Hostmask,
        deltas: Vec<ModeDelta>,
    },
}

impl Event {
    /// Static kind name, used for logging and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Topic { .. } => "topic",
            Self::TopicSync { .. } => "topic_sync",
            Self::Kick { .. } => "kick",
            Self::ModeChange { .. } => "mode",
        }
    }

    pub fn channel(&self) -> &str {
        match self {
            Self::Join { channel, .. }
            | Self::Topic { channel, .. }
            | Self::TopicSync { channel, .. }
            | Self::Kick { channel, .. }
            | Self::ModeChange { channel, .. } => channel,
        }
    }

    /// The acting user. `TopicSync` has none.
    pub fn actor(&self) -> Option<&Hostmask> {
        match self {
            Self::Join { actor, .. }
            | Self::Topic { actor, .. }
            | Self::Kick { actor, .. }
            | Self::ModeChange { actor, .. } => Some(actor),
            Self::TopicSync { .. } => None,
        }
    }
}

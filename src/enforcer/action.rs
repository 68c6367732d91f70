//! Corrective actions and their translation to outbound commands.

use slirc_proto::{Command, ModeDelta};
use std::fmt;

/// A corrective command decided by a guard. The first field is always the
/// channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Set a ban on (channel, mask).
    Ban(String, String),
    /// Remove a ban on (channel, mask).
    Unban(String, String),
    /// Kick (channel, nick, reason).
    Kick(String, String, Option<String>),
    Op(String, String),
    Deop(String, String),
    Halfop(String, String),
    Dehalfop(String, String),
    Voice(String, String),
    Devoice(String, String),
    /// Set the topic of (channel, text).
    Topic(String, String),
    /// Invite (channel, nick) back.
    Invite(String, String),
}

impl Action {
    /// Static kind name, used for logging and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ban(..) => "ban",
            Self::Unban(..) => "unban",
            Self::Kick(..) => "kick",
            Self::Op(..) => "op",
            Self::Deop(..) => "deop",
            Self::Halfop(..) => "halfop",
            Self::Dehalfop(..) => "dehalfop",
            Self::Voice(..) => "voice",
            Self::Devoice(..) => "devoice",
            Self::Topic(..) => "topic",
            Self::Invite(..) => "invite",
        }
    }

    pub fn channel(&self) -> &str {
        match self {
            Self::Ban(c, _)
            | Self::Unban(c, _)
            | Self::Kick(c, _, _)
            | Self::Op(c, _)
            | Self::Deop(c, _)
            | Self::Halfop(c, _)
            | Self::Dehalfop(c, _)
            | Self::Voice(c, _)
            | Self::Devoice(c, _)
            | Self::Topic(c, _)
            | Self::Invite(c, _) => c,
        }
    }

    /// Translate 1:1 into the outbound command.
    pub fn to_command(&self) -> Command {
        let mode = |delta: ModeDelta| Command::ChannelMODE(self.channel().to_string(), vec![delta]);
        match self {
            Self::Ban(_, mask) => mode(ModeDelta::ban(mask)),
            Self::Unban(_, mask) => mode(ModeDelta::unban(mask)),
            Self::Op(_, nick) => mode(ModeDelta::op(nick)),
            Self::Deop(_, nick) => mode(ModeDelta::deop(nick)),
            Self::Halfop(_, nick) => mode(ModeDelta::halfop(nick)),
            Self::Dehalfop(_, nick) => mode(ModeDelta::dehalfop(nick)),
            Self::Voice(_, nick) => mode(ModeDelta::voice(nick)),
            Self::Devoice(_, nick) => mode(ModeDelta::devoice(nick)),
            Self::Kick(channel, nick, reason) => {
                Command::KICK(channel.clone(), nick.clone(), reason.clone())
            }
            Self::Topic(channel, text) => Command::TOPIC(channel.clone(), Some(text.clone())),
            Self::Invite(channel, nick) => Command::INVITE(nick.clone(), channel.clone()),
        }
    }
}

impl From<&Action> for Command {
    fn from(action: &Action) -> Self {
        action.to_command()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_command())
    }
}

//! Nick-to-hostmask resolution.

use dashmap::DashMap;
use slirc_proto::{Hostmask, irc_to_lower};
use std::collections::HashSet;
use tracing::trace;

/// Resolves a nickname to the hostmask currently using it.
pub trait NickResolver: Send + Sync {
    fn hostmask_of(&self, nick: &str) -> Option<Hostmask>;
}

/// Concurrent roster shared between the dispatcher, which keeps it current,
/// and the enforcer, which reads it.
///
/// A nick stays resolvable while it shares at least one channel with the bot.
#[derive(Debug, Default)]
pub struct Roster {
    users: DashMap<String, Member>,
}

#[derive(Debug, Clone)]
struct Member {
    hostmask: Hostmask,
    /// Casefolded channel names.
    channels: HashSet<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or refresh) the hostmask seen for its nick. Channel
    /// membership is left as it was.
    pub fn observe(&self, hostmask: Hostmask) {
        trace!(hostmask = %hostmask, "Roster observe");
        self.users
            .entry(irc_to_lower(&hostmask.nick))
            .and_modify(|m| m.hostmask = hostmask.clone())
            .or_insert_with(|| Member {
                hostmask,
                channels: HashSet::new(),
            });
    }

    /// Record `hostmask` as present on `channel`.
    pub fn join(&self, channel: &str, hostmask: Hostmask) {
        trace!(channel = %channel, hostmask = %hostmask, "Roster join");
        let channel = irc_to_lower(channel);
        let mut member = self
            .users
            .entry(irc_to_lower(&hostmask.nick))
            .or_insert_with(|| Member {
                hostmask: hostmask.clone(),
                channels: HashSet::new(),
            });
        member.hostmask = hostmask;
        member.channels.insert(channel);
    }

    /// Drop `nick` from `channel`. The entry is forgotten once it is on no
    /// channel at all. Returns whether the nick was known.
    pub fn part(&self, channel: &str, nick: &str) -> bool {
        let key = irc_to_lower(nick);
        match self.users.get_mut(&key) {
            Some(mut member) => {
                member.channels.remove(&irc_to_lower(channel));
            }
            None => return false,
        }
        if self.users.remove_if(&key, |_, m| m.channels.is_empty()).is_some() {
            trace!(nick = %nick, "Roster forget, no channels left");
        }
        true
    }

    /// Forget `nick` everywhere, as on quit.
    pub fn forget(&self, nick: &str) -> Option<Hostmask> {
        self.users.remove(&irc_to_lower(nick)).map(|(_, m)| m.hostmask)
    }

    /// Move an entry to a new nick. Unknown nicks are ignored.
    pub fn rename(&self, old: &str, new: &str) -> bool {
        match self.users.remove(&irc_to_lower(old)) {
            Some((_, mut member)) => {
                member.hostmask.nick = new.to_string();
                self.users.insert(irc_to_lower(new), member);
                true
            }
            None => false,
        }
    }

    /// Whether `nick` is known to be on `channel`.
    pub fn is_on(&self, nick: &str, channel: &str) -> bool {
        self.users
            .get(&irc_to_lower(nick))
            .is_some_and(|m| m.channels.contains(&irc_to_lower(channel)))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl NickResolver for Roster {
    fn hostmask_of(&self, nick: &str) -> Option<Hostmask> {
        self.users
            .get(&irc_to_lower(nick))
            .map(|m| m.value().hostmask.clone())
    }
}

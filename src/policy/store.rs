//! Capability store seam and the config-backed implementation.

use crate::config::Config;
use slirc_proto::{Hostmask, irc_to_lower, matches_hostmask};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::capability::{anti_capability, is_anti_capability};

/// Grants and bans, owned outside the enforcer.
///
/// Implementations handle their own I/O and timeouts; the enforcer treats
/// every call as synchronous and fast.
pub trait CapabilityStore: Send + Sync {
    /// Whether `hostmask` holds `capability` (global or `#channel,name`).
    fn check_capability(&self, hostmask: &Hostmask, capability: &str) -> bool;

    /// Whether `hostmask` matches an active ban on `channel`.
    fn is_banned(&self, channel: &str, hostmask: &Hostmask) -> bool;

    /// Whether `channel` itself carries `capability` (unscoped, e.g. `-op`).
    /// Stores without channel policy hold nothing.
    fn channel_has(&self, _channel: &str, _capability: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
struct UserRecord {
    name: String,
    patterns: Vec<String>,
    capabilities: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
struct BanList {
    bans: Vec<String>,
    exceptions: Vec<String>,
}

/// In-memory store built from `[[user]]` and `[[channel]]` config blocks.
///
/// A hostmask belongs to the first user with a matching pattern. Holding the
/// anti form of a capability denies it even when the positive form is also
/// held; unknown hostmasks hold nothing. Channels carry their own unscoped
/// capabilities (`-op` on `#rust` reverts every unwanted `+o` there).
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilityStore {
    users: Vec<UserRecord>,
    bans: HashMap<String, BanList>,
    channel_caps: HashMap<String, HashSet<String>>,
}

impl StaticCapabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        let mut store = Self::new();
        for user in &config.users {
            store = store.with_user(&user.name, &user.hostmasks[..], &user.capabilities[..]);
        }
        for channel in &config.channels {
            for mask in &channel.bans {
                store = store.with_ban(&channel.name, mask);
            }
            for mask in &channel.exceptions {
                store = store.with_exception(&channel.name, mask);
            }
            for capability in &channel.capabilities {
                store = store.with_channel_capability(&channel.name, capability);
            }
        }
        store
    }

    /// Register a user. Capability names are casemapped.
    pub fn with_user<P, C>(mut self, name: &str, patterns: &[P], capabilities: &[C]) -> Self
    where
        P: AsRef<str>,
        C: AsRef<str>,
    {
        self.users.push(UserRecord {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            capabilities: capabilities
                .iter()
                .map(|c| irc_to_lower(c.as_ref()))
                .collect(),
        });
        self
    }

    pub fn with_ban(mut self, channel: &str, mask: &str) -> Self {
        self.bans
            .entry(irc_to_lower(channel))
            .or_default()
            .bans
            .push(mask.to_string());
        self
    }

    pub fn with_exception(mut self, channel: &str, mask: &str) -> Self {
        self.bans
            .entry(irc_to_lower(channel))
            .or_default()
            .exceptions
            .push(mask.to_string());
        self
    }

    /// Give `channel` an unscoped capability such as `-op`.
    pub fn with_channel_capability(mut self, channel: &str, capability: &str) -> Self {
        self.channel_caps
            .entry(irc_to_lower(channel))
            .or_default()
            .insert(irc_to_lower(capability));
        self
    }

    fn identify(&self, hostmask: &Hostmask) -> Option<&UserRecord> {
        let mask = hostmask.to_string();
        self.users
            .iter()
            .find(|u| u.patterns.iter().any(|p| matches_hostmask(p, &mask)))
    }
}

impl CapabilityStore for StaticCapabilityStore {
    fn check_capability(&self, hostmask: &Hostmask, capability: &str) -> bool {
        let Some(user) = self.identify(hostmask) else {
            return false;
        };
        let name = irc_to_lower(capability);

        if !is_anti_capability(&name) && user.capabilities.contains(&anti_capability(&name)) {
            debug!(user = %user.name, capability = %name, "Capability denied by anti-capability");
            return false;
        }
        user.capabilities.contains(&name)
    }

    fn is_banned(&self, channel: &str, hostmask: &Hostmask) -> bool {
        let Some(list) = self.bans.get(&irc_to_lower(channel)) else {
            return false;
        };
        let mask = hostmask.to_string();
        list.bans.iter().any(|b| matches_hostmask(b, &mask))
            && !list.exceptions.iter().any(|e| matches_hostmask(e, &mask))
    }

    fn channel_has(&self, channel: &str, capability: &str) -> bool {
        self.channel_caps
            .get(&irc_to_lower(channel))
            .is_some_and(|caps| caps.contains(&irc_to_lower(capability)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Hostmask {
        Hostmask::new("alice", "alice", "home.example.org")
    }

    #[test]
    fn test_unknown_principal_holds_nothing() {
        let store = StaticCapabilityStore::new().with_user("bob", &["bob!*@*"], &["admin"]);
        assert!(!store.check_capability(&alice(), "admin"));
    }

    #[test]
    fn test_grants_are_case_insensitive() {
        let store =
            StaticCapabilityStore::new().with_user("alice", &["*!alice@*.example.org"], &["#Rust,op"]);
        assert!(store.check_capability(&alice(), "#rust,op"));
        assert!(store.check_capability(&alice(), "#RUST,op"));
        assert!(!store.check_capability(&alice(), "#rust,voice"));
    }

    #[test]
    fn test_anti_capability_overrides_grant() {
        let store = StaticCapabilityStore::new().with_user(
            "alice",
            &["alice!*@*"],
            &["#rust,op", "#rust,-op", "#rust,-voice"],
        );
        assert!(!store.check_capability(&alice(), "#rust,op"));
        assert!(store.check_capability(&alice(), "#rust,-op"));
        assert!(store.check_capability(&alice(), "#rust,-voice"));
        assert!(!store.check_capability(&alice(), "#rust,voice"));
    }

    #[test]
    fn test_first_matching_user_wins() {
        let store = StaticCapabilityStore::new()
            .with_user("wide", &["*!*@*"], &["#rust,voice"])
            .with_user("alice", &["alice!*@*"], &["#rust,op"]);
        assert!(store.check_capability(&alice(), "#rust,voice"));
        assert!(!store.check_capability(&alice(), "#rust,op"));
    }

    #[test]
    fn test_ban_with_exception() {
        let store = StaticCapabilityStore::new()
            .with_ban("#rust", "*!*@*.example.org")
            .with_exception("#Rust", "alice!*@*");
        assert!(!store.is_banned("#rust", &alice()));
        assert!(store.is_banned("#RUST", &Hostmask::new("mallory", "m", "x.example.org")));
        assert!(!store.is_banned("#other", &Hostmask::new("mallory", "m", "x.example.org")));
    }

    #[test]
    fn test_channel_capabilities() {
        let store = StaticCapabilityStore::new().with_channel_capability("#Rust", "-OP");
        assert!(store.channel_has("#rust", "-op"));
        assert!(!store.channel_has("#rust", "-voice"));
        assert!(!store.channel_has("#other", "-op"));
        // Channel policy is not a user grant.
        assert!(!store.check_capability(&alice(), "#rust,-op"));
    }
}

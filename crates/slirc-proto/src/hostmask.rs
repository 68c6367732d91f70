//! User hostmasks (`nick!user@host`).
//!
//! A hostmask addresses and identifies a principal. The enforcer receives the
//! acting user's hostmask with every event and derives ban masks from it.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::HostmaskParseError;

/// A user's `nick!user@host` identity triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hostmask {
    /// Nickname.
    pub nick: String,
    /// Username (ident).
    pub user: String,
    /// Hostname or address.
    pub host: String,
}

impl Hostmask {
    /// Build a hostmask from its three components.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
        }
    }

    /// Derive a generic ban mask covering this user's host.
    ///
    /// - IPv4 `a.b.c.d` bans the /24: `*!*@a.b.c.*`
    /// - a dotted hostname bans its domain: `*!*@*.example.org`
    /// - single-label hosts and IPv6 addresses are banned exactly
    /// - without a host the nickname is banned instead
    ///
    /// ```
    /// use slirc_proto::Hostmask;
    ///
    /// let h = Hostmask::new("nick", "user", "192.168.1.20");
    /// assert_eq!(h.banmask(), "*!*@192.168.1.*");
    /// ```
    pub fn banmask(&self) -> String {
        let host = self.host.as_str();
        if host.is_empty() {
            return format!("{}!*@*", self.nick);
        }
        if host.parse::<Ipv4Addr>().is_ok() {
            if let Some(idx) = host.rfind('.') {
                return format!("*!*@{}.*", &host[..idx]);
            }
        }
        if !host.contains(':') {
            if let Some(idx) = host.find('.') {
                return format!("*!*@*{}", &host[idx..]);
            }
        }
        format!("*!*@{}", host)
    }
}

impl fmt::Display for Hostmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}@{}", self.nick, self.user, self.host)
    }
}

impl FromStr for Hostmask {
    type Err = HostmaskParseError;

    /// Lenient parse: `nick`, `nick!user`, `nick@host` and `nick!user@host`
    /// are all accepted; missing parts are left empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(HostmaskParseError::InvalidCharacters(s.to_owned()));
        }

        let (rest, host) = match s.split_once('@') {
            Some((rest, host)) => (rest, host),
            None => (s, ""),
        };
        let (nick, user) = match rest.split_once('!') {
            Some((nick, user)) => (nick, user),
            None => (rest, ""),
        };

        if nick.is_empty() {
            return Err(HostmaskParseError::EmptyNick(s.to_owned()));
        }

        Ok(Self::new(nick, user, host))
    }
}

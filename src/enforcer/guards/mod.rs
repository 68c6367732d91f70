//! One guard per event kind. Each guard reads policy and channel state and
//! pushes its corrective actions onto a [`Responder`](super::Responder).

pub mod join;
pub mod kick;
pub mod mode;
pub mod topic;

use slirc_proto::{Hostmask, irc_eq};

use crate::policy::PolicyEvaluator;
use crate::state::NickResolver;

/// Read-only collaborators shared by every guard.
pub struct GuardContext<'a> {
    pub policy: &'a PolicyEvaluator,
    pub resolver: &'a dyn NickResolver,
    pub bot_nick: &'a str,
}

impl GuardContext<'_> {
    pub fn is_bot(&self, nick: &str) -> bool {
        irc_eq(nick, self.bot_nick)
    }

    /// Current hostmask for `nick`, if the roster knows it.
    pub fn resolve(&self, nick: &str) -> Option<Hostmask> {
        self.resolver.hostmask_of(nick)
    }
}

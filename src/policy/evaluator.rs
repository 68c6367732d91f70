//! Read-only policy queries used by the guards.

use slirc_proto::Hostmask;
use std::sync::Arc;

use super::capability::Capability;
use super::store::CapabilityStore;

/// Pure query surface over a [`CapabilityStore`]. Never mutates state and
/// never issues actions.
#[derive(Clone)]
pub struct PolicyEvaluator {
    store: Arc<dyn CapabilityStore>,
}

impl PolicyEvaluator {
    pub fn new(store: Arc<dyn CapabilityStore>) -> Self {
        Self { store }
    }

    /// Whether `principal` holds `capability` on `channel`.
    pub fn has_capability(&self, principal: &Hostmask, channel: &str, capability: Capability) -> bool {
        self.store
            .check_capability(principal, &capability.scoped(channel))
    }

    /// Whether `principal` holds any of `capabilities` on `channel`.
    pub fn has_any(&self, principal: &Hostmask, channel: &str, capabilities: &[Capability]) -> bool {
        capabilities
            .iter()
            .any(|cap| self.has_capability(principal, channel, *cap))
    }

    /// Protected principals hold `op` or `protected` on the channel.
    pub fn is_protected(&self, principal: &Hostmask, channel: &str) -> bool {
        self.has_any(principal, channel, &[Capability::Op, Capability::Protected])
    }

    pub fn is_banned(&self, principal: &Hostmask, channel: &str) -> bool {
        self.store.is_banned(channel, principal)
    }

    /// Whether the channel itself carries `capability`.
    pub fn channel_has(&self, channel: &str, capability: Capability) -> bool {
        self.store.channel_has(channel, capability.as_str())
    }
}

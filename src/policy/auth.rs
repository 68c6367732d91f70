//! Authorization for administrative commands.

use slirc_proto::Hostmask;
use std::sync::Arc;

use super::store::CapabilityStore;

/// Decides whether a requester may arm an enforcer. Injected into the
/// controller and consulted before any state changes.
pub trait AuthorizationCheck: Send + Sync {
    fn is_authorized(&self, requester: &Hostmask) -> bool;
}

impl<F> AuthorizationCheck for F
where
    F: Fn(&Hostmask) -> bool + Send + Sync,
{
    fn is_authorized(&self, requester: &Hostmask) -> bool {
        self(requester)
    }
}

/// Requires a global capability from a [`CapabilityStore`].
pub struct RequireCapability {
    store: Arc<dyn CapabilityStore>,
    capability: String,
}

impl RequireCapability {
    pub fn new(store: Arc<dyn CapabilityStore>, capability: impl Into<String>) -> Self {
        Self {
            store,
            capability: capability.into(),
        }
    }
}

impl AuthorizationCheck for RequireCapability {
    fn is_authorized(&self, requester: &Hostmask) -> bool {
        self.store.check_capability(requester, &self.capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::StaticCapabilityStore;

    #[test]
    fn test_require_capability() {
        let store = Arc::new(
            StaticCapabilityStore::new().with_user("root", &["root!*@*"], &["admin"]),
        );
        let check = RequireCapability::new(store, "admin");
        assert!(check.is_authorized(&Hostmask::new("root", "r", "h")));
        assert!(!check.is_authorized(&Hostmask::new("guest", "g", "h")));
    }

    #[test]
    fn test_closure_check() {
        let check = |h: &Hostmask| h.host == "trusted.example";
        assert!(check.is_authorized(&Hostmask::new("a", "b", "trusted.example")));
        assert!(!check.is_authorized(&Hostmask::new("a", "b", "elsewhere")));
    }
}

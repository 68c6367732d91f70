//! Default value functions for configuration.

// =============================================================================
// Enforcer Defaults
// =============================================================================

pub fn default_trusted_service() -> String {
    "ChanServ".to_string()
}

pub fn default_admin_capability() -> String {
    "admin".to_string()
}

// =============================================================================
// Runtime Defaults
// =============================================================================

pub fn default_queue_depth() -> usize {
    100
}

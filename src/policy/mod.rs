//! Capability policy: scoped capability names, the capability store seam,
//! and the read-only evaluator the guards query.
//!
//! Guards never talk to a store directly; they go through
//! [`PolicyEvaluator`], which derives `#channel,capability` names and applies
//! the protected-principal rule.

mod auth;
mod capability;
mod evaluator;
mod store;

pub use auth::{AuthorizationCheck, RequireCapability};
pub use capability::{Capability, anti_capability, channel_capability, is_anti_capability};
pub use evaluator::PolicyEvaluator;
pub use store::{CapabilityStore, StaticCapabilityStore};

//! # slirc-enforcer
//!
//! Channel-policy enforcement for IRC bots. The enforcer watches joins,
//! topic changes, kicks and mode changes on the channels its bot sits in,
//! checks each one against a capability policy, and answers violations with
//! corrective commands: kick banned users, hand out earned roles, revert
//! unauthorized topics, restore demoted operators, and optionally take
//! revenge on whoever broke the rules.
//!
//! The library is transport-agnostic. A dispatcher turns wire messages into
//! [`enforcer::Event`]s, the enforcer turns them into [`enforcer::Action`]s,
//! and a [`runtime::CommandSink`] puts the resulting commands on the wire.

pub mod config;
pub mod enforcer;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod replay;
pub mod runtime;
pub mod state;
pub mod telemetry;

pub use enforcer::{Action, Enforcer, EnforcerConfig, Event, StartArgs};
pub use error::{EnforcerError, SinkError};
pub use runtime::{CommandSink, EnforcerActor, EnforcerHandle};

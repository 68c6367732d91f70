//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions and loading
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup validation of a loaded config

pub(crate) mod defaults;
mod types;
mod validation;

pub use types::{ChannelBlock, Config, ConfigError, EnforcerSection, RuntimeConfig, UserBlock};
pub use validation::{ValidationError, validate};

//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use slirc_proto::{ChannelExt, irc_to_lower};
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("enforcer.bot_nick is required")]
    MissingBotNick,
    #[error("enforcer.trusted_service must not be empty")]
    EmptyTrustedService,
    #[error("enforcer.admin_capability must not be empty")]
    EmptyAdminCapability,
    #[error("runtime.queue_depth must be at least 1")]
    ZeroQueueDepth,
    #[error("invalid channel name: {0:?}")]
    InvalidChannel(String),
    #[error("channel {0} is configured more than once")]
    DuplicateChannel(String),
    #[error("user {0} has no hostmasks")]
    NoHostmasks(String),
    #[error("user {user} has an invalid hostmask pattern: {pattern:?}")]
    InvalidHostmask { user: String, pattern: String },
    #[error("user {user} has an invalid capability: {capability:?}")]
    InvalidCapability { user: String, capability: String },
    #[error("channel {channel} has an invalid capability: {capability:?}")]
    InvalidChannelCapability { channel: String, capability: String },
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.enforcer.bot_nick.trim().is_empty() {
        errors.push(ValidationError::MissingBotNick);
    }
    if config.enforcer.trusted_service.trim().is_empty() {
        errors.push(ValidationError::EmptyTrustedService);
    }
    if config.enforcer.admin_capability.trim().is_empty() {
        errors.push(ValidationError::EmptyAdminCapability);
    }
    if config.runtime.queue_depth == 0 {
        errors.push(ValidationError::ZeroQueueDepth);
    }

    let mut seen = HashSet::new();
    for channel in &config.channels {
        if !channel.name.is_channel_name() {
            errors.push(ValidationError::InvalidChannel(channel.name.clone()));
        } else if !seen.insert(irc_to_lower(&channel.name)) {
            errors.push(ValidationError::DuplicateChannel(channel.name.clone()));
        }
        // Channel capabilities are already scoped by their block.
        for capability in &channel.capabilities {
            if capability.contains(',') || !is_valid_capability(capability) {
                errors.push(ValidationError::InvalidChannelCapability {
                    channel: channel.name.clone(),
                    capability: capability.clone(),
                });
            }
        }
    }

    for user in &config.users {
        if user.hostmasks.is_empty() {
            errors.push(ValidationError::NoHostmasks(user.name.clone()));
        }
        for pattern in &user.hostmasks {
            if pattern.is_empty() || pattern.chars().any(|c| c.is_whitespace()) {
                errors.push(ValidationError::InvalidHostmask {
                    user: user.name.clone(),
                    pattern: pattern.clone(),
                });
            }
        }
        for capability in &user.capabilities {
            if !is_valid_capability(capability) {
                errors.push(ValidationError::InvalidCapability {
                    user: user.name.clone(),
                    capability: capability.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `name`, `-name`, `#chan,name` or `#chan,-name`.
fn is_valid_capability(capability: &str) -> bool {
    let name = match capability.split_once(',') {
        Some((channel, name)) => {
            if !channel.is_channel_name() {
                return false;
            }
            name
        }
        None => capability,
    };
    let name = name.strip_prefix('-').unwrap_or(name);
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

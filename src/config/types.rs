//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_admin_capability, default_queue_depth, default_trusted_service};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Enforcer configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Instance identity and start-command defaults.
    pub enforcer: EnforcerSection,
    /// Actor runtime tuning.
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// Known principals and their capabilities.
    #[serde(default, rename = "user")]
    pub users: Vec<UserBlock>,
    /// Per-channel ban lists and topic prefixes.
    #[serde(default, rename = "channel")]
    pub channels: Vec<ChannelBlock>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// `[enforcer]` block.
#[derive(Debug, Clone, Deserialize)]
pub struct EnforcerSection {
    /// The bot's own nickname. Its own changes are exempt from most checks.
    pub bot_nick: String,
    /// Principal whose actions are never policed (default: "ChanServ").
    #[serde(default = "default_trusted_service")]
    pub trusted_service: String,
    /// Escalate demotions to ban+kick when no start argument overrides it.
    #[serde(default)]
    pub revenge: bool,
    /// Mandatory topic prefix when no start argument overrides it.
    #[serde(default)]
    pub topic_prefix: String,
    /// Capability required to issue the start command (default: "admin").
    #[serde(default = "default_admin_capability")]
    pub admin_capability: String,
}

/// `[runtime]` block.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Bounded depth of the actor inbox and the outbound command queue.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            queue_depth: default_queue_depth(),
        }
    }
}

/// `[[user]]` block: one known principal.
#[derive(Debug, Clone, Deserialize)]
pub struct UserBlock {
    /// Account name, used only for logging.
    pub name: String,
    /// Wildcard hostmask patterns identifying this user.
    pub hostmasks: Vec<String>,
    /// Capability names, global (`admin`) or channel-scoped (`#chan,op`, `#chan,-voice`).
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// `[[channel]]` block.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelBlock {
    /// Channel name.
    pub name: String,
    /// Ban masks.
    #[serde(default)]
    pub bans: Vec<String>,
    /// Masks exempt from the ban list.
    #[serde(default)]
    pub exceptions: Vec<String>,
    /// Channel-wide capabilities, unscoped (`-op` reverts unwanted `+o`).
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Overrides the started topic prefix for this channel.
    pub topic_prefix: Option<String>,
}

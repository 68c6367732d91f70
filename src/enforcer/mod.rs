//! Enforcer controller.
//!
//! The [`Enforcer`] is the single entry point for the dispatcher. It starts
//! out unarmed and drops every event; a successful [`Enforcer::start`] fixes
//! its configuration for the rest of its life. Once armed, each event is
//! routed by kind to its guard and the guard's actions come back in the order
//! they must be sent.

mod action;
mod event;
pub mod guards;
mod responder;
mod start;

pub use action::Action;
pub use event::Event;
pub use responder::Responder;
pub use start::{START_COMMAND, StartArgs, start_reply};

use slirc_proto::{ChannelExt, Hostmask, irc_eq};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::config::defaults::default_trusted_service;
use crate::error::EnforcerError;
use crate::metrics;
use crate::policy::{AuthorizationCheck, CapabilityStore, PolicyEvaluator, RequireCapability};
use crate::state::{ChannelStateStore, NickResolver};
use crate::telemetry::{EventTimer, spans};
use guards::GuardContext;

/// Per-instance settings fixed by the start command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcerConfig {
    /// Principal whose events are never policed.
    pub trusted_service: String,
    /// Escalate demotions to ban+kick.
    pub revenge: bool,
    /// Mandatory prefix for channel topics.
    pub topic_prefix: String,
}

impl Default for EnforcerConfig {
    fn default() -> Self {
        Self {
            trusted_service: default_trusted_service(),
            revenge: false,
            topic_prefix: String::new(),
        }
    }
}

impl EnforcerConfig {
    /// Start-command defaults from the `[enforcer]` block.
    pub fn from_config(config: &Config) -> Self {
        Self {
            trusted_service: config.enforcer.trusted_service.clone(),
            revenge: config.enforcer.revenge,
            topic_prefix: config.enforcer.topic_prefix.clone(),
        }
    }
}

/// Lifecycle state. There is no way back from `Armed`.
#[derive(Debug)]
enum Arming {
    Unarmed,
    Armed {
        config: EnforcerConfig,
        channels: ChannelStateStore,
    },
}

/// The channel-policy enforcer for one bot connection.
pub struct Enforcer {
    bot_nick: String,
    policy: PolicyEvaluator,
    resolver: Arc<dyn NickResolver>,
    auth: Arc<dyn AuthorizationCheck>,
    admin_capability: String,
    defaults: EnforcerConfig,
    prefix_overrides: HashMap<String, String>,
    arming: Arming,
}

impl Enforcer {
    /// An unarmed enforcer. Starting it requires the global `admin`
    /// capability from `store` unless [`with_authorization`](Self::with_authorization)
    /// replaces the check.
    pub fn new(
        bot_nick: impl Into<String>,
        store: Arc<dyn CapabilityStore>,
        resolver: Arc<dyn NickResolver>,
    ) -> Self {
        let admin_capability = crate::config::defaults::default_admin_capability();
        Self {
            bot_nick: bot_nick.into(),
            policy: PolicyEvaluator::new(store.clone()),
            resolver,
            auth: Arc::new(RequireCapability::new(store, admin_capability.clone())),
            admin_capability,
            defaults: EnforcerConfig::default(),
            prefix_overrides: HashMap::new(),
            arming: Arming::Unarmed,
        }
    }

    /// Build from a loaded config file: bot nick, start defaults, the admin
    /// capability, and per-channel topic prefixes.
    pub fn from_config(
        config: &Config,
        store: Arc<dyn CapabilityStore>,
        resolver: Arc<dyn NickResolver>,
    ) -> Self {
        let admin = config.enforcer.admin_capability.clone();
        let prefixes = config
            .channels
            .iter()
            .filter_map(|c| c.topic_prefix.clone().map(|p| (c.name.clone(), p)))
            .collect();

        let check = RequireCapability::new(store.clone(), admin.clone());
        Self::new(config.enforcer.bot_nick.clone(), store, resolver)
            .with_authorization(Arc::new(check), admin)
            .with_defaults(EnforcerConfig::from_config(config))
            .with_topic_prefixes(prefixes)
    }

    /// Replace the start-command authorization. `capability` names what the
    /// requester lacks in the denial reply.
    pub fn with_authorization(
        mut self,
        auth: Arc<dyn AuthorizationCheck>,
        capability: impl Into<String>,
    ) -> Self {
        self.auth = auth;
        self.admin_capability = capability.into();
        self
    }

    pub fn with_defaults(mut self, defaults: EnforcerConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Channel-specific topic prefixes that replace the started one.
    pub fn with_topic_prefixes(mut self, prefixes: HashMap<String, String>) -> Self {
        self.prefix_overrides = prefixes;
        self
    }

    pub fn bot_nick(&self) -> &str {
        &self.bot_nick
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.arming, Arming::Armed { .. })
    }

    /// The active configuration, once armed.
    pub fn config(&self) -> Option<&EnforcerConfig> {
        match &self.arming {
            Arming::Armed { config, .. } => Some(config),
            Arming::Unarmed => None,
        }
    }

    /// Cached topic for `channel`; `""` when unarmed or never seen.
    pub fn cached_topic(&self, channel: &str) -> &str {
        match &self.arming {
            Arming::Armed { channels, .. } => channels.get_topic(channel),
            Arming::Unarmed => "",
        }
    }

    /// Arm the enforcer. Authorization is checked before anything else and a
    /// denied request changes nothing.
    pub fn start(&mut self, requester: &Hostmask, args: StartArgs) -> Result<(), EnforcerError> {
        let _span = spans::start(&requester.nick).entered();

        if !self.auth.is_authorized(requester) {
            warn!(requester = %requester, "Start denied");
            return Err(EnforcerError::PermissionDenied(self.admin_capability.clone()));
        }
        if self.is_armed() {
            return Err(EnforcerError::AlreadyArmed);
        }

        let config = args.resolve(&self.defaults);
        info!(
            trusted_service = %config.trusted_service,
            revenge = config.revenge,
            topic_prefix = %config.topic_prefix,
            "Enforcer armed"
        );
        let channels =
            ChannelStateStore::new(config.topic_prefix.clone(), self.prefix_overrides.clone());
        self.arming = Arming::Armed { config, channels };
        metrics::set_armed(true);
        Ok(())
    }

    /// Decide the corrective actions for one event.
    ///
    /// Unarmed instances and events from the trusted service yield nothing.
    /// On `MalformedEvent` the error carries whatever was decided before the
    /// bad part of the event.
    pub fn handle_event(&mut self, event: &Event) -> Result<Vec<Action>, EnforcerError> {
        let kind = event.kind();
        let actor = event.actor().map(|a| a.nick.as_str());
        let _span = spans::event(kind, event.channel(), actor).entered();

        let Arming::Armed { config, channels } = &mut self.arming else {
            debug!("Enforcer not armed, dropping event");
            metrics::record_dropped("unarmed");
            return Ok(Vec::new());
        };
        if event
            .actor()
            .is_some_and(|actor| irc_eq(&actor.nick, &config.trusted_service))
        {
            metrics::record_dropped("trusted_service");
            return Ok(Vec::new());
        }

        if !event.channel().is_channel_name() {
            let err = EnforcerError::malformed(format!("{:?} is not a channel", event.channel()));
            metrics::record_event_error(kind, err.error_code());
            return Err(err);
        }
        let _timer = EventTimer::new(kind);

        let ctx = GuardContext {
            policy: &self.policy,
            resolver: self.resolver.as_ref(),
            bot_nick: &self.bot_nick,
        };
        let mut out = Responder::new(config.revenge);

        let result = match event {
            Event::Join { channel, actor } => {
                channels.observe(channel);
                guards::join::check(&ctx, channel, actor, &mut out);
                Ok(())
            }
            Event::Topic {
                channel,
                actor,
                topic,
            } => {
                guards::topic::check(&ctx, channels, channel, actor, topic, &mut out);
                Ok(())
            }
            Event::TopicSync { channel, topic } => {
                guards::topic::sync(channels, channel, topic);
                Ok(())
            }
            Event::Kick {
                channel,
                actor,
                kicked,
            } => {
                channels.observe(channel);
                guards::kick::check(&ctx, channel, actor, kicked, &mut out)
            }
            Event::ModeChange {
                channel,
                actor,
                deltas,
            } => {
                channels.observe(channel);
                guards::mode::check(&ctx, channel, actor, deltas, &mut out)
            }
        };

        let actions = out.into_actions();
        for action in &actions {
            metrics::record_action(action.kind());
        }

        match result {
            Ok(()) => {
                if !actions.is_empty() {
                    info!(actions = actions.len(), "Policy violation corrected");
                }
                Ok(actions)
            }
            Err(EnforcerError::MalformedEvent { reason, .. }) => {
                warn!(reason = %reason, decided = actions.len(), "Malformed event");
                metrics::record_event_error(kind, "malformed_event");
                Err(EnforcerError::MalformedEvent {
                    reason,
                    decided: actions,
                })
            }
            Err(e) => {
                metrics::record_event_error(kind, e.error_code());
                Err(e)
            }
        }
    }
}

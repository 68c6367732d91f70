//! Unified error handling for slirc-enforcer.
//!
//! Every per-event failure is a value returned to the caller; nothing here
//! is allowed to stop an armed enforcer.

use crate::enforcer::Action;
use thiserror::Error;

/// Success acknowledgment sent to a requester.
pub const REPLY_SUCCESS: &str = "The operation succeeded.";

// ============================================================================
// Enforcer Errors
// ============================================================================

/// Errors surfaced by the enforcer controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnforcerError {
    /// The start command was issued without the administrative capability.
    #[error("permission denied: {0} capability required")]
    PermissionDenied(String),

    /// The instance was already started; its configuration is immutable.
    #[error("enforcer is already armed")]
    AlreadyArmed,

    /// A start-command argument could not be understood.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The event could not be processed. `decided` holds the actions chosen
    /// for earlier parts of the same event, which are still dispatched.
    #[error("malformed event: {reason}")]
    MalformedEvent { reason: String, decided: Vec<Action> },

    /// The actor task is gone.
    #[error("enforcer actor is not running")]
    ActorGone,
}

impl EnforcerError {
    /// Build a malformed-event error with nothing decided yet.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            reason: reason.into(),
            decided: Vec::new(),
        }
    }

    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "permission_denied",
            Self::AlreadyArmed => "already_armed",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::MalformedEvent { .. } => "malformed_event",
            Self::ActorGone => "actor_gone",
        }
    }

    /// Text of the NOTICE sent back to a requester, if the error warrants one.
    pub fn reply_text(&self) -> Option<String> {
        match self {
            Self::PermissionDenied(cap) => Some(format!("You don't have the {} capability.", cap)),
            Self::AlreadyArmed => Some("The enforcer is already running.".to_string()),
            Self::InvalidArgument(msg) => Some(format!("Invalid argument: {}", msg)),
            Self::MalformedEvent { .. } | Self::ActorGone => None,
        }
    }
}

// ============================================================================
// Sink Errors
// ============================================================================

/// Failure to hand a command to the outbound transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("command sink closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EnforcerError::AlreadyArmed.error_code(), "already_armed");
        assert_eq!(EnforcerError::malformed("x").error_code(), "malformed_event");
        assert_eq!(
            EnforcerError::PermissionDenied("admin".into()).error_code(),
            "permission_denied"
        );
    }

    #[test]
    fn test_reply_text() {
        assert_eq!(
            EnforcerError::PermissionDenied("admin".into()).reply_text().as_deref(),
            Some("You don't have the admin capability.")
        );
        // Event errors never produce a reply
        assert!(EnforcerError::malformed("bad").reply_text().is_none());
        assert!(EnforcerError::ActorGone.reply_text().is_none());
    }
}

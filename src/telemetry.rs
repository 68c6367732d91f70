//! Telemetry utilities for event timing and tracing spans.

use std::time::Instant;

/// Guard for timing event handling and recording metrics.
///
/// Records event latency when dropped.
pub struct EventTimer {
    kind: &'static str,
    start: Instant,
}

impl EventTimer {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            start: Instant::now(),
        }
    }
}

impl Drop for EventTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_event(self.kind, duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span for handling one channel event.
    pub fn event(kind: &str, channel: &str, actor: Option<&str>) -> Span {
        if let Some(actor) = actor {
            info_span!("event", kind = %kind, channel = %channel, actor = %actor)
        } else {
            info_span!("event", kind = %kind, channel = %channel)
        }
    }

    /// Span for a start command.
    pub fn start(requester: &str) -> Span {
        info_span!("start", requester = %requester)
    }
}

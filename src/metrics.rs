//! Prometheus metrics for slirc-enforcer.
//!
//! - `slirc_enforcer_events_total{kind}` - Events handled while armed
//! - `slirc_enforcer_event_duration_seconds{kind}` - Handling latency
//! - `slirc_enforcer_events_dropped_total{reason}` - Events ignored (unarmed, trusted service)
//! - `slirc_enforcer_actions_total{action}` - Corrective actions emitted
//! - `slirc_enforcer_event_errors_total{kind,error}` - Per-event failures

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters
// ========================================================================

/// Events handled by kind (join, topic, topic_sync, kick, mode).
pub static EVENTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Events dropped before reaching a guard, by reason.
pub static EVENTS_DROPPED: OnceLock<IntCounterVec> = OnceLock::new();

/// Corrective actions emitted by kind.
pub static ACTIONS: OnceLock<IntCounterVec> = OnceLock::new();

/// Event errors by event kind and error code.
pub static EVENT_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Commands the sink refused.
pub static SINK_FAILURES: OnceLock<IntCounter> = OnceLock::new();

// ========================================================================
// Gauges and histograms
// ========================================================================

/// 1 once the enforcer has been started.
pub static ARMED: OnceLock<IntGauge> = OnceLock::new();

/// Event handling latency by kind.
pub static EVENT_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup. Recording before `init` is a silent no-op.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                }
            }
        };
    }

    register!(EVENTS, IntCounterVec::new(Opts::new("slirc_enforcer_events_total", "Events handled by kind"), &["kind"]));
    register!(EVENTS_DROPPED, IntCounterVec::new(Opts::new("slirc_enforcer_events_dropped_total", "Events ignored before enforcement"), &["reason"]));
    register!(ACTIONS, IntCounterVec::new(Opts::new("slirc_enforcer_actions_total", "Corrective actions emitted"), &["action"]));
    register!(EVENT_ERRORS, IntCounterVec::new(Opts::new("slirc_enforcer_event_errors_total", "Event errors by kind"), &["kind", "error"]));
    register!(SINK_FAILURES, IntCounter::new("slirc_enforcer_sink_failures_total", "Commands the sink refused"));
    register!(ARMED, IntGauge::new("slirc_enforcer_armed", "Whether the enforcer has been started"));
    register!(EVENT_LATENCY, HistogramVec::new(
        HistogramOpts::new("slirc_enforcer_event_duration_seconds", "Event handling latency by kind")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05]),
        &["kind"]
    ));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Recording helpers
// ============================================================================

/// Record a handled event with latency.
#[inline]
pub fn record_event(kind: &str, duration_secs: f64) {
    if let Some(c) = EVENTS.get() {
        c.with_label_values(&[kind]).inc();
    }
    if let Some(h) = EVENT_LATENCY.get() {
        h.with_label_values(&[kind]).observe(duration_secs);
    }
}

#[inline]
pub fn record_dropped(reason: &str) {
    if let Some(c) = EVENTS_DROPPED.get() {
        c.with_label_values(&[reason]).inc();
    }
}

#[inline]
pub fn record_action(action: &str) {
    if let Some(c) = ACTIONS.get() {
        c.with_label_values(&[action]).inc();
    }
}

/// Record an event error.
#[inline]
pub fn record_event_error(kind: &str, error: &str) {
    if let Some(c) = EVENT_ERRORS.get() {
        c.with_label_values(&[kind, error]).inc();
    }
}

#[inline]
pub fn record_sink_failure() {
    if let Some(c) = SINK_FAILURES.get() {
        c.inc();
    }
}

#[inline]
pub fn set_armed(armed: bool) {
    if let Some(g) = ARMED.get() {
        g.set(i64::from(armed));
    }
}

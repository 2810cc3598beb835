//! Observability: resolution counters and sink abstractions.
//!
//! The engine never touches counters directly; every instrumentation point
//! emits a `ResolveEvent` through `sink::record`. Diagnostic logs go through
//! `tracing` and are left to whatever subscriber the host installs.

pub mod metrics;
pub mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{MetricsSink, ResolveEvent, metrics_report, metrics_reset_all, with_metrics_sink};

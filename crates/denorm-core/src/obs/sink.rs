//! Metrics sink boundary.
//!
//! Resolution logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through ResolveEvent and MetricsSink.
//!
//! This module is the only allowed bridge between resolution logic
//! and the thread-local metrics state.
use crate::{model::SchemaKind, obs::metrics};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// ResolveEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveEvent {
    Dispatch {
        kind: SchemaKind,
    },
    CacheHit {
        entity: &'static str,
    },
    CacheInsert {
        entity: &'static str,
    },
    StoreHit {
        entity: &'static str,
    },
    StoreMiss {
        entity: &'static str,
    },
    CollectionScan {
        entity: &'static str,
        rows: u64,
    },
    FieldRead {
        entity: &'static str,
        field: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: ResolveEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: ResolveEvent) {
        metrics::with_state_mut(|m| match event {
            ResolveEvent::Dispatch { kind } => match kind {
                SchemaKind::Entity => {
                    m.ops.dispatch_entity = m.ops.dispatch_entity.saturating_add(1);
                }
                SchemaKind::Collection => {
                    m.ops.dispatch_collection = m.ops.dispatch_collection.saturating_add(1);
                }
                SchemaKind::Union => {
                    m.ops.dispatch_union = m.ops.dispatch_union.saturating_add(1);
                }
            },

            ResolveEvent::CacheHit { entity } => {
                m.ops.cache_hits = m.ops.cache_hits.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.cache_hits = entry.cache_hits.saturating_add(1);
            }

            ResolveEvent::CacheInsert { entity } => {
                m.ops.cache_inserts = m.ops.cache_inserts.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.cache_inserts = entry.cache_inserts.saturating_add(1);
            }

            ResolveEvent::StoreHit { entity } => {
                m.ops.store_hits = m.ops.store_hits.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.store_hits = entry.store_hits.saturating_add(1);
            }

            ResolveEvent::StoreMiss { entity } => {
                m.ops.store_misses = m.ops.store_misses.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.store_misses = entry.store_misses.saturating_add(1);
            }

            ResolveEvent::CollectionScan { entity, rows } => {
                m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.rows_scanned = entry.rows_scanned.saturating_add(rows);
            }

            ResolveEvent::FieldRead { entity, .. } => {
                m.ops.field_reads = m.ops.field_reads.saturating_add(1);
                let entry = m.entities.entry(entity.to_string()).or_default();
                entry.field_reads = entry.field_reads.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: ResolveEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's resolution counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's resolution counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// Events recorded inside `f` go to `sink` only; the global counters are
/// untouched. Overrides nest and are restored on unwind.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

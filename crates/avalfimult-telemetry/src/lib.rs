//! AvalFIMult Telemetry
//!
//! Provides:
//! - In-process request counters with snapshots
//! - Prometheus metric names and descriptions, recorded through the `metrics` facade

pub mod metrics;

pub use crate::metrics::{describe_metrics, MetricsCollector, MetricsSnapshot, RejectionReason};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsCollector, MetricsSnapshot, RejectionReason};
}

//! Metrics collection and reporting

use avalfimult_core::Verdict;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const REQUESTS_TOTAL: &str = "avalfimult_requests_total";
pub const REJECTIONS_TOTAL: &str = "avalfimult_rejections_total";
pub const VERDICTS_TOTAL: &str = "avalfimult_verdicts_total";
pub const ERRORS_TOTAL: &str = "avalfimult_errors_total";
pub const SCORING_LATENCY_US: &str = "avalfimult_scoring_latency_us";

/// Register descriptions for every exported metric.
///
/// Call once after installing a recorder.
pub fn describe_metrics() {
    ::metrics::describe_counter!(REQUESTS_TOTAL, "Total number of scoring requests received");
    ::metrics::describe_counter!(
        REJECTIONS_TOTAL,
        "Requests rejected before scoring, by reason"
    );
    ::metrics::describe_counter!(VERDICTS_TOTAL, "Verdicts returned, by verdict");
    ::metrics::describe_counter!(ERRORS_TOTAL, "Scoring failures after the model was invoked");
    ::metrics::describe_histogram!(
        SCORING_LATENCY_US,
        ::metrics::Unit::Microseconds,
        "Scaler plus classifier latency in microseconds"
    );
}

/// Why a request never reached the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Missing or non-numeric parameter
    Validation,
    /// Business rule rejected the indicators
    Policy,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Policy => "policy",
        }
    }
}

/// Metrics collector for AvalFIMult request accounting
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    total_requests: AtomicU64,
    validation_rejections: AtomicU64,
    policy_rejections: AtomicU64,
    viable: AtomicU64,
    not_viable: AtomicU64,
    scoring_errors: AtomicU64,
    scoring_latency_us: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                total_requests: AtomicU64::new(0),
                validation_rejections: AtomicU64::new(0),
                policy_rejections: AtomicU64::new(0),
                viable: AtomicU64::new(0),
                not_viable: AtomicU64::new(0),
                scoring_errors: AtomicU64::new(0),
                scoring_latency_us: AtomicU64::new(0),
            }),
        }
    }

    /// Record a request
    pub fn record_request(&self) {
        self.inner.total_requests.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!(REQUESTS_TOTAL).increment(1);
    }

    /// Record a request rejected before scoring
    pub fn record_rejection(&self, reason: RejectionReason) {
        let counter = match reason {
            RejectionReason::Validation => &self.inner.validation_rejections,
            RejectionReason::Policy => &self.inner.policy_rejections,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!(REJECTIONS_TOTAL, "reason" => reason.as_str()).increment(1);
    }

    /// Record a verdict and the time spent producing it
    pub fn record_verdict(&self, verdict: Verdict, latency_us: u64) {
        let counter = match verdict {
            Verdict::Viable => &self.inner.viable,
            Verdict::NotViable => &self.inner.not_viable,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.inner
            .scoring_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
        ::metrics::counter!(VERDICTS_TOTAL, "verdict" => verdict.as_str()).increment(1);
        ::metrics::histogram!(SCORING_LATENCY_US).record(latency_us as f64);
    }

    /// Record a failure after the scorer was invoked
    pub fn record_scoring_error(&self) {
        self.inner.scoring_errors.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!(ERRORS_TOTAL).increment(1);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.inner.total_requests.load(Ordering::Relaxed),
            validation_rejections: self.inner.validation_rejections.load(Ordering::Relaxed),
            policy_rejections: self.inner.policy_rejections.load(Ordering::Relaxed),
            viable: self.inner.viable.load(Ordering::Relaxed),
            not_viable: self.inner.not_viable.load(Ordering::Relaxed),
            scoring_errors: self.inner.scoring_errors.load(Ordering::Relaxed),
            scoring_latency_us: self.inner.scoring_latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub validation_rejections: u64,
    pub policy_rejections: u64,
    pub viable: u64,
    pub not_viable: u64,
    pub scoring_errors: u64,
    pub scoring_latency_us: u64,
}

impl MetricsSnapshot {
    /// Requests that reached the scorer
    pub fn scored(&self) -> u64 {
        self.viable + self.not_viable + self.scoring_errors
    }

    /// Average scoring latency over successful verdicts
    pub fn avg_scoring_latency_us(&self) -> u64 {
        let verdicts = self.viable + self.not_viable;
        if verdicts == 0 {
            0
        } else {
            self.scoring_latency_us / verdicts
        }
    }

    /// Share of successful verdicts that were "Viable"
    pub fn viable_rate(&self) -> f64 {
        let verdicts = self.viable + self.not_viable;
        if verdicts == 0 {
            0.0
        } else {
            self.viable as f64 / verdicts as f64
        }
    }
}

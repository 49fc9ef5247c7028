//! Application state shared across all requests

use anyhow::Result;
use avalfimult_model::{LoadedArtifacts, ScoringProcedure};
use avalfimult_policy::PolicyEngine;
use avalfimult_telemetry::MetricsCollector;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests.
///
/// Everything here is read-only after startup; artifacts are never reloaded
/// within a process lifetime.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Scaler + classifier applied to every accepted request
    pub scorer: Arc<ScoringProcedure>,

    /// Business rules checked before scoring
    pub policy_engine: Arc<PolicyEngine>,

    /// Request counters
    pub metrics: MetricsCollector,

    /// Prometheus handle for rendering `/metrics`, when a recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Initialize application state from configuration, loading both artifacts
    pub fn new(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Result<Self> {
        info!("Initializing application state");

        info!(
            "Loading artifacts: scaler={}, model={}",
            config.artifacts.scaler_path().display(),
            config.artifacts.model_path().display()
        );
        let artifacts = LoadedArtifacts::load(&config.artifacts)?;

        let policy_engine = config.policy.build_engine()?;
        info!(
            "Loaded {} policies with {} enabled rules",
            policy_engine.policies().len(),
            policy_engine.rule_count()
        );

        Ok(Self::from_parts(
            config,
            ScoringProcedure::new(artifacts),
            policy_engine,
            metrics_handle,
        ))
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        config: ServerConfig,
        scorer: ScoringProcedure,
        policy_engine: PolicyEngine,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            scorer: Arc::new(scorer),
            policy_engine: Arc::new(policy_engine),
            metrics: MetricsCollector::new(),
            metrics_handle,
        }
    }
}

//! The scoring procedure: feature vector, scaler, classifier, verdict

use avalfimult_core::{FeatureVector, Indicators, Label, Result, Verdict};
use std::time::Instant;
use tracing::{error, info};

use crate::model_loader::LoadedArtifacts;

/// Applies the loaded scaler and classifier to validated indicators
#[derive(Debug, Clone)]
pub struct ScoringProcedure {
    artifacts: LoadedArtifacts,
}

/// Everything computed while scoring one request
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    /// Feature vector in training order
    pub raw: FeatureVector,

    /// Feature vector after the scaler transform
    pub normalized: FeatureVector,

    /// Raw classifier output
    pub label: Label,

    /// Verdict mapped from the label
    pub verdict: Verdict,

    /// Time spent scaling and classifying
    pub latency_us: u64,
}

impl ScoringProcedure {
    /// Create a scoring procedure over loaded artifacts
    pub fn new(artifacts: LoadedArtifacts) -> Self {
        Self { artifacts }
    }

    /// Loaded artifacts used by this procedure
    pub fn artifacts(&self) -> &LoadedArtifacts {
        &self.artifacts
    }

    /// Score one set of indicators.
    ///
    /// Fails with `UnexpectedLabel` if the classifier returns anything other
    /// than 0 or 1.
    pub fn score(&self, indicators: &Indicators) -> Result<ScoringOutcome> {
        let start = Instant::now();

        let raw = indicators.feature_vector();
        let normalized = self.artifacts.scaler.transform(&raw);
        let label = self.artifacts.classifier.predict(&normalized)?;

        let verdict = Verdict::from_label(label).map_err(|e| {
            error!(
                model = %self.artifacts.classifier.identity(),
                scaler = %self.artifacts.scaler.identity(),
                raw = %raw,
                normalized = %normalized,
                label = %label,
                "Classifier returned a label outside {{0, 1}}"
            );
            e
        })?;

        let latency_us = start.elapsed().as_micros() as u64;

        info!(
            model = %self.artifacts.classifier.identity(),
            scaler = %self.artifacts.scaler.identity(),
            resgate = indicators.resgate,
            capta = indicators.capta,
            patliq = indicators.patliq,
            pattotal = indicators.pattotal,
            normalized = %normalized,
            label = %label,
            verdict = %verdict,
            latency_us,
            "Scored fund indicators"
        );

        Ok(ScoringOutcome {
            raw,
            normalized,
            label,
            verdict,
            latency_us,
        })
    }
}

//! Classifier trait and common types

use avalfimult_core::{FeatureVector, Label, Result};

/// Trait for all binary classifiers applied to a normalized feature vector
pub trait Classifier: Send + Sync {
    /// Predict the class label of a single normalized row
    fn predict(&self, features: &FeatureVector) -> Result<Label>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Short description of the fitted model, used in request logs
    fn identity(&self) -> String {
        self.name().to_string()
    }
}

/// Pick the class whose vote/weight is largest; ties resolve to the first class
pub(crate) fn argmax_class(weights: &[f64], classes: &[f64]) -> Option<Label> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &w) in weights.iter().enumerate() {
        match best {
            Some((_, bw)) if w <= bw => {}
            _ => best = Some((i, w)),
        }
    }
    best.and_then(|(i, _)| classes.get(i).copied()).map(Label)
}

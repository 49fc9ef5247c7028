//! Logistic regression classifier

use avalfimult_core::{Error, FeatureVector, Label, Result, FEATURE_COUNT};

use crate::classifier::Classifier;

/// A fitted binary logistic regression
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: [f64; FEATURE_COUNT],
    intercept: f64,
    classes: [f64; 2],
}

impl LogisticRegression {
    /// Create a logistic regression from its fitted coefficients.
    ///
    /// `classes[1]` is predicted when the decision function is positive.
    pub fn new(coef: &[f64], intercept: f64, classes: &[f64]) -> Result<Self> {
        let coef: [f64; FEATURE_COUNT] = coef.try_into().map_err(|_| {
            Error::artifact(format!(
                "logistic regression has {} coefficients, expected {}",
                coef.len(),
                FEATURE_COUNT
            ))
        })?;
        let classes: [f64; 2] = classes.try_into().map_err(|_| {
            Error::artifact(format!(
                "logistic regression must have exactly 2 classes, got {}",
                classes.len()
            ))
        })?;
        if coef.iter().chain(std::iter::once(&intercept)).any(|v| !v.is_finite()) {
            return Err(Error::artifact("logistic regression has non-finite weights"));
        }
        Ok(Self {
            coef,
            intercept,
            classes,
        })
    }

    /// Signed distance to the decision boundary
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        self.coef
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the positive class
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        1.0 / (1.0 + (-self.decision_function(features)).exp())
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let idx = usize::from(self.decision_function(features) > 0.0);
        Ok(Label(self.classes[idx]))
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }

    fn identity(&self) -> String {
        format!("LogisticRegression(n_features={FEATURE_COUNT})")
    }
}

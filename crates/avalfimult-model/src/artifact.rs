//! Language-neutral artifact formats for fitted scalers and classifiers
//!
//! Artifacts are JSON documents tagged by `kind`, exported from the training
//! pipeline. Example scaler:
//!
//! ```json
//! { "kind": "standard", "mean": [1.0, 2.0, 3.0, 4.0], "scale": [1.0, 1.0, 1.0, 1.0] }
//! ```

use avalfimult_core::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::classifier::Classifier;
use crate::linear::LogisticRegression;
use crate::scaler::{IdentityScaler, MinMaxScaler, Scaler, StandardScaler};
use crate::tree::DecisionTreeClassifier;

/// Serialized feature scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// Standardization with fitted `mean` and `scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },

    /// Min-max scaling in fitted form (`x * scale + min`)
    MinMax { min: Vec<f64>, scale: Vec<f64> },

    /// No scaling
    Identity,
}

impl ScalerArtifact {
    /// Parse a scaler artifact from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and instantiate the scaler
    pub fn build(self) -> Result<Arc<dyn Scaler>> {
        Ok(match self {
            Self::Standard { mean, scale } => Arc::new(StandardScaler::new(&mean, &scale)?),
            Self::MinMax { min, scale } => Arc::new(MinMaxScaler::new(&min, &scale)?),
            Self::Identity => Arc::new(IdentityScaler),
        })
    }
}

/// Serialized classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    /// CART decision tree in flattened node-array form
    DecisionTree {
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<Vec<f64>>,
        #[serde(default = "default_classes")]
        classes: Vec<f64>,
    },

    /// Binary logistic regression
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_classes")]
        classes: Vec<f64>,
    },
}

fn default_classes() -> Vec<f64> {
    vec![0.0, 1.0]
}

impl ClassifierArtifact {
    /// Parse a classifier artifact from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and instantiate the classifier
    pub fn build(self) -> Result<Arc<dyn Classifier>> {
        Ok(match self {
            Self::DecisionTree {
                children_left,
                children_right,
                feature,
                threshold,
                value,
                classes,
            } => Arc::new(DecisionTreeClassifier::new(
                children_left,
                children_right,
                feature,
                threshold,
                value,
                classes,
            )?),
            Self::LogisticRegression {
                coef,
                intercept,
                classes,
            } => Arc::new(LogisticRegression::new(&coef, intercept, &classes)?),
        })
    }
}

//! AvalFIMult Core
//!
//! Core types and error handling shared across AvalFIMult components.
//!
//! This crate provides:
//! - The four fund indicators and the fixed-order feature vector built from them
//! - Classifier labels and the viability verdict they map to
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{FeatureVector, Indicator, Indicators, Label, Verdict, FEATURE_COUNT};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{FeatureVector, Indicator, Indicators, Label, Verdict};
}

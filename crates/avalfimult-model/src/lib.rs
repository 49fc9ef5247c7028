//! AvalFIMult Model
//!
//! Fitted feature scalers and binary classifiers, the artifact loader that
//! reads them from disk, and the scoring procedure that applies them.
//!
//! Scoring a request is a single synchronous pass:
//! feature vector → scaler → classifier → verdict. Artifacts are immutable
//! once loaded and are shared between requests through `Arc`.

pub mod artifact;
pub mod classifier;
pub mod linear;
pub mod model_loader;
pub mod scaler;
pub mod scoring;
pub mod tree;

pub use artifact::{ClassifierArtifact, ScalerArtifact};
pub use classifier::Classifier;
pub use linear::LogisticRegression;
pub use model_loader::{load_classifier, load_scaler, ArtifactConfig, LoadedArtifacts};
pub use scaler::{IdentityScaler, MinMaxScaler, Scaler, StandardScaler};
pub use scoring::{ScoringOutcome, ScoringProcedure};
pub use tree::DecisionTreeClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::model_loader::{ArtifactConfig, LoadedArtifacts};
    pub use crate::scaler::Scaler;
    pub use crate::scoring::{ScoringOutcome, ScoringProcedure};
}

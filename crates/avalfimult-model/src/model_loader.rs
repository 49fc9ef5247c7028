//! Artifact loading
//!
//! Both artifacts are read once at process start and shared read-only for the
//! lifetime of the process. A missing, corrupt or structurally invalid file is
//! fatal; there is no fallback model and no retry.

use avalfimult_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::artifact::{ClassifierArtifact, ScalerArtifact};
use crate::classifier::Classifier;
use crate::scaler::Scaler;

/// Where the scaler and classifier artifacts live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Directory holding both artifacts
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Scaler file name inside `dir`
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,

    /// Classifier file name inside `dir`
    #[serde(default = "default_model_file")]
    pub model_file: String,
}

fn default_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_scaler_file() -> String {
    "scaler.json".to_string()
}

fn default_model_file() -> String {
    "model.json".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            scaler_file: default_scaler_file(),
            model_file: default_model_file(),
        }
    }
}

impl ArtifactConfig {
    /// Create a configuration for a directory using the default file names
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the scaler artifact
    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler_file)
    }

    /// Full path of the classifier artifact
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model_file)
    }
}

/// The scaler and classifier pair, shared read-only across requests
#[derive(Clone)]
pub struct LoadedArtifacts {
    pub scaler: Arc<dyn Scaler>,
    pub classifier: Arc<dyn Classifier>,
}

impl LoadedArtifacts {
    /// Load both artifacts described by `config`
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let scaler = load_scaler(config.scaler_path())?;
        let classifier = load_classifier(config.model_path())?;

        info!(
            scaler = %scaler.identity(),
            model = %classifier.identity(),
            "Artifacts loaded from {}",
            config.dir.display()
        );

        Ok(Self { scaler, classifier })
    }

    /// Pair already-built artifacts
    pub fn new(scaler: Arc<dyn Scaler>, classifier: Arc<dyn Classifier>) -> Self {
        Self { scaler, classifier }
    }
}

impl fmt::Debug for LoadedArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedArtifacts")
            .field("scaler", &self.scaler.identity())
            .field("classifier", &self.classifier.identity())
            .finish()
    }
}

/// Read and build a scaler artifact
pub fn load_scaler(path: impl AsRef<Path>) -> Result<Arc<dyn Scaler>> {
    let path = path.as_ref();
    let json = read_artifact("scaler", path)?;
    ScalerArtifact::from_json(&json)
        .and_then(ScalerArtifact::build)
        .map_err(|e| Error::artifact(format!("invalid scaler artifact {}: {}", path.display(), e)))
}

/// Read and build a classifier artifact
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>> {
    let path = path.as_ref();
    let json = read_artifact("model", path)?;
    ClassifierArtifact::from_json(&json)
        .and_then(ClassifierArtifact::build)
        .map_err(|e| Error::artifact(format!("invalid model artifact {}: {}", path.display(), e)))
}

fn read_artifact(what: &str, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::artifact(format!("failed to read {} artifact {}: {}", what, path.display(), e))
    })
}

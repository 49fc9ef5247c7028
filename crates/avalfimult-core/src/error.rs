//! Error types for AvalFIMult

/// Result type alias using AvalFIMult's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for AvalFIMult operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or non-numeric request parameters
    #[error("validation error: {0}")]
    Validation(String),

    /// A business rule rejected the request before scoring
    #[error("policy violation: {0}")]
    PolicyViolation(String),

    /// Scaler or classifier artifact could not be loaded
    #[error("artifact load error: {0}")]
    ArtifactLoad(String),

    /// Classifier produced a label outside {0, 1}
    #[error("unexpected label: {0}")]
    UnexpectedLabel(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new policy violation
    pub fn policy(msg: impl Into<String>) -> Self {
        Self::PolicyViolation(msg.into())
    }

    /// Create a new artifact load error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::ArtifactLoad(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller supplied bad input (as opposed to a server-side fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::PolicyViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::validation("resgate").is_client_error());
        assert!(Error::policy("floor").is_client_error());
        assert!(!Error::artifact("missing").is_client_error());
        assert!(!Error::UnexpectedLabel("2".into()).is_client_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "model.json");
        let err: Error = io.into();
        assert!(err.to_string().starts_with("io error"));
    }
}

//! Error types for modelcache

use crate::model::ModelKind;
use thiserror::Error;

/// Main error type for modelcache
#[derive(Error, Debug)]
pub enum ModelCacheError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A model constructor failed
    #[error("Failed to construct {kind} model: {reason}")]
    Construction {
        /// Kind of model that was being built
        kind: ModelKind,
        /// Why construction failed
        reason: String,
    },

    /// Render context error
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for modelcache operations
pub type ModelCacheResult<T> = Result<T, ModelCacheError>;

impl ModelCacheError {
    /// Shorthand for a construction failure
    pub fn construction(kind: ModelKind, reason: impl Into<String>) -> Self {
        ModelCacheError::Construction {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for ModelCacheError {
    fn from(err: toml::de::Error) -> Self {
        ModelCacheError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelCacheError::Config("invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: invalid config");
    }

    #[test]
    fn test_construction_error_display() {
        let err = ModelCacheError::construction(ModelKind::Sheep, "texture missing");
        assert_eq!(
            err.to_string(),
            "Failed to construct sheep model: texture missing"
        );
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let err: ModelCacheError = toml_err.into();
        assert!(matches!(err, ModelCacheError::Config(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ModelCacheError = io_err.into();
        assert!(matches!(err, ModelCacheError::Io(_)));
    }
}

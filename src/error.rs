//! Error types for the ModelForge toolkit

use thiserror::Error;

/// Result type alias for ModelForge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Main error type for the ModelForge toolkit
///
/// One variant per failure class, ordered by the training lifecycle:
/// configuration problems surface before any engine call, annotation
/// preconditions before any dataset load, and artifact problems only
/// after a model was fitted.
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing annotations: {0}")]
    MissingAnnotations(String),

    #[error("Data loading error: {0}")]
    DataLoad(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Artifact write error: {0}")]
    ArtifactWrite(String),
}

impl From<polars::error::PolarsError> for ForgeError {
    fn from(err: polars::error::PolarsError) -> Self {
        ForgeError::DataLoad(err.to_string())
    }
}

//! Error types for charm-tools.

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for charm-tools operations.
pub type CharmResult<T> = Result<T, CharmError>;

/// Error type for charm-tools operations.
///
/// Proofing never fails with this type; problems found in a charm are
/// diagnostics. These errors cover the operations around it.
#[derive(Debug, Error)]
pub enum CharmError {
    /// The given path does not hold a charm.
    #[error("Not a charm: {0}")]
    NotACharm(std::path::PathBuf),

    /// Directory to list charms from does not exist.
    #[error("Charm directory not found: {0}")]
    DirectoryNotFound(std::path::PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

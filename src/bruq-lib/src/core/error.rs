use std::io;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BruqError>;

#[derive(Debug, Error)]
pub enum BruqError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory not found: {}", crate::core::paths::clean_path_str(.0))]
    DirectoryNotFound(String),

    #[error("Not a directory: {}", crate::core::paths::clean_path_str(.0))]
    NotADirectory(String),

    #[error("Not a collection (missing {manifest}): {}", crate::core::paths::clean_path_str(.path))]
    NotACollection { path: String, manifest: &'static str },

    #[error("Invalid collection manifest {}: {reason}", crate::core::paths::clean_path_str(.path))]
    InvalidManifest { path: String, reason: String },

    #[error("Request not found: {0}")]
    RequestNotFound(String),

    #[error("Environment not found: {0}")]
    EnvironmentNotFound(String),

    #[error("Executable not found: '{0}'. Is it installed and on PATH?")]
    ExecutableMissing(String),

    #[error("Run timed out after {0:?}")]
    Timeout(Duration),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl BruqError {
    /// Setup problems (missing executable) are not worth retrying; timeouts may be.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BruqError::Timeout(_))
    }
}

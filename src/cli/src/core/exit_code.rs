use bruq_lib::BruqError;

/// Exit codes for the bruq CLI
/// Following standard Unix/POSIX conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General/unspecified error
    GeneralError = 1,
    /// Invalid arguments (reported by clap)
    UsageError = 2,
    /// Configuration error (manifest, environment, unrunnable request)
    ConfigError = 3,
    /// File not found, not a collection, or IO error
    FileError = 4,
    /// Request not found
    NotFoundError = 5,
    /// The executor could not be started or failed to run
    ExecutorError = 6,
    /// The executor did not finish in time
    Timeout = 7,
    /// The run completed but requests or assertions failed
    RunFailed = 8,
    /// Strict validation reported problems
    ValidationFailed = 9,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<&BruqError> for ExitCode {
    fn from(error: &BruqError) -> Self {
        match error {
            BruqError::Io(_) => ExitCode::FileError,
            BruqError::DirectoryNotFound(_) => ExitCode::FileError,
            BruqError::NotADirectory(_) => ExitCode::FileError,
            BruqError::NotACollection { .. } => ExitCode::FileError,
            BruqError::InvalidManifest { .. } => ExitCode::ConfigError,
            BruqError::RequestNotFound(_) => ExitCode::NotFoundError,
            BruqError::EnvironmentNotFound(_) => ExitCode::ConfigError,
            BruqError::Validation(_) => ExitCode::ConfigError,
            BruqError::ExecutableMissing(_) => ExitCode::ExecutorError,
            BruqError::Execution(_) => ExitCode::ExecutorError,
            BruqError::Timeout(_) => ExitCode::Timeout,
        }
    }
}

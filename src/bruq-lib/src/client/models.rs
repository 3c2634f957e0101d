use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Per-run settings forwarded to the executor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Environment file name (without `.bru`) under `environments/`.
    pub environment: Option<String>,
    /// Extra `--env-var` overrides, in key order.
    pub env_vars: BTreeMap<String, String>,
    /// Overrides the configured timeout for this run only.
    pub timeout: Option<Duration>,
}

impl RunOptions {
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// What gets handed to the executor: a request file, a folder, or the whole
/// collection when `path` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    pub root: PathBuf,
    /// Relative to `root`, `/`-separated.
    pub path: String,
    pub recursive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    pub path: PathBuf,
    pub name: String,
    pub version: String,
    pub request_count: usize,
    pub environment_count: usize,
}

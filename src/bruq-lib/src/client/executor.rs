use super::models::{RunOptions, RunTarget};
use crate::core::error::{BruqError, Result};
use crate::normalize::RawOutput;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use uuid::Uuid;

pub const ARTIFACT_PREFIX: &str = "bruq-run-";

/// Runs the external collection tool as a subprocess.
///
/// The child runs with the collection root as its working directory and is
/// asked to write a JSON report to a fresh temp file. A run that exceeds the
/// timeout is killed and reported as [`BruqError::Timeout`]; any partial
/// output is discarded.
#[derive(Debug, Clone)]
pub struct Executor {
    executable: String,
    timeout: Duration,
}

impl Executor {
    pub fn new(executable: impl Into<String>, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            timeout,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub async fn run(
        &self,
        target: &RunTarget,
        options: &RunOptions,
    ) -> Result<(RawOutput, Option<Value>)> {
        let artifact = artifact_path();
        let args = arguments(target, options, &artifact);
        let timeout = options.timeout.unwrap_or(self.timeout);

        log::debug!(
            "Running '{} {}' in {}",
            self.executable,
            args.join(" "),
            target.root.display()
        );

        let child = Command::new(&self.executable)
            .args(&args)
            .current_dir(&target.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => BruqError::ExecutableMissing(self.executable.clone()),
                _ => BruqError::Execution(format!("failed to start '{}': {e}", self.executable)),
            })?;

        // Dropping the pending wait on timeout drops the child, which kills it.
        let waited = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .ok();
        let output = settle(waited, &artifact, timeout)?;

        let raw = RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            // Killed by a signal: no code to report.
            exit_code: output.status.code().unwrap_or(-1),
        };
        log::debug!("Executor exited with {}", raw.exit_code);

        Ok((raw, read_artifact(&artifact)))
    }
}

/// Output of a finished child. A timed-out wait (`None`) or a failed one
/// leaves no report worth keeping, so the artifact is removed first.
fn settle(
    waited: Option<std::io::Result<Output>>,
    artifact: &Path,
    timeout: Duration,
) -> Result<Output> {
    match waited {
        Some(Ok(output)) => Ok(output),
        Some(Err(e)) => {
            remove_artifact(artifact);
            Err(e.into())
        }
        None => {
            remove_artifact(artifact);
            log::warn!("Run exceeded {timeout:?} and was killed");
            Err(BruqError::Timeout(timeout))
        }
    }
}

fn artifact_path() -> PathBuf {
    std::env::temp_dir().join(format!("{ARTIFACT_PREFIX}{}.json", Uuid::new_v4()))
}

/// Command-line arguments after the executable name.
pub fn arguments(target: &RunTarget, options: &RunOptions, artifact: &Path) -> Vec<String> {
    let mut args = vec!["run".to_string()];
    if !target.path.is_empty() {
        args.push(target.path.clone());
    }
    if target.recursive {
        args.push("-r".to_string());
    }
    if let Some(env) = &options.environment {
        args.push("--env".to_string());
        args.push(env.clone());
    }
    for (key, value) in &options.env_vars {
        args.push("--env-var".to_string());
        args.push(format!("{key}={value}"));
    }
    args.push("--reporter-json".to_string());
    args.push(artifact.display().to_string());
    args
}

/// Parsed report, if the child wrote a readable one. The file is removed
/// either way.
fn read_artifact(path: &Path) -> Option<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("No JSON report at {}: {e}", path.display());
            return None;
        }
    };
    remove_artifact(path);

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unparsable JSON report: {e}");
            None
        }
    }
}

fn remove_artifact(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            log::warn!("Could not remove {}: {e}", path.display());
        }
    }
}

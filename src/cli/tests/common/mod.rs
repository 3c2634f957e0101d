#![allow(dead_code)]
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const USERS_API: &str = "tests/fixtures/workspace/users-api";
pub const LEGACY_API: &str = "tests/fixtures/workspace/legacy-api";
pub const WORKSPACE: &str = "tests/fixtures/workspace";

/// The built CLI, run from the package directory so fixture paths resolve.
pub fn bruq_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bruq"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("BRUQ_EXECUTABLE")
        .env_remove("BRUQ_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

/// Absolute path of a file under the package directory.
pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn run_ok(args: &[&str]) -> Result<String, String> {
    let output = bruq_cmd()
        .args(args)
        .output()
        .map_err(|e| format!("Failed to execute command: {e}"))?;
    if !output.status.success() {
        return Err(format!(
            "Command {args:?} failed: {}",
            stderr_of(&output)
        ));
    }
    Ok(stdout_of(&output))
}

pub fn run_json(args: &[&str]) -> Result<Value, String> {
    let stdout = run_ok(args)?;
    serde_json::from_str(&stdout).map_err(|e| format!("Invalid JSON ({e}):\n{stdout}"))
}

pub fn json_subset(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(exp_map), Value::Object(act_map)) => {
            for (k, v) in exp_map {
                if let Some(act_v) = act_map.get(k) {
                    if !json_subset(v, act_v) {
                        return false;
                    }
                } else {
                    return false; // Key missing in actual
                }
            }
            true
        }
        (Value::Array(exp_arr), Value::Array(act_arr)) => {
            if exp_arr.len() != act_arr.len() {
                return false;
            }
            for (e, a) in exp_arr.iter().zip(act_arr.iter()) {
                if !json_subset(e, a) {
                    return false;
                }
            }
            true
        }
        (Value::String(s), _) if s == "{{*}}" => true,
        (Value::String(s), Value::String(a)) if s.starts_with("{{regex:") && s.ends_with("}}") => {
            let pattern = &s[8..s.len() - 2];
            if let Ok(re) = regex::Regex::new(pattern) {
                re.is_match(a)
            } else {
                false
            }
        }
        _ => expected == actual,
    }
}

pub fn assert_json_subset(expected: &Value, actual: &Value) -> Result<(), String> {
    if json_subset(expected, actual) {
        Ok(())
    } else {
        Err(format!(
            "JSON mismatch!\nExpected subset:\n{}\nActual:\n{}",
            serde_json::to_string_pretty(expected).unwrap_or_default(),
            serde_json::to_string_pretty(actual).unwrap_or_default()
        ))
    }
}

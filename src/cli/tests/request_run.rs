// Integration tests for `bruq request run`. The collection runner is replaced
// by the `run` script in the users-api fixture, invoked as `sh run ...`.
use libtest_mimic::{run, Arguments, Failed, Trial};
use serde_json::{json, Value};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

mod common;
use common::{assert_json_subset, bruq_cmd, fixture, stderr_of, stdout_of, USERS_API};

fn main() {
    let args = Arguments::from_args();

    let trials: Vec<Trial> = vec![
        Trial::test("run_single_request_json", test_run_single_request_json),
        Trial::test("run_passes_arguments", test_run_passes_arguments),
        Trial::test("run_whole_collection", test_run_whole_collection),
        Trial::test("run_folder", test_run_folder),
        Trial::test("run_failed_report", test_run_failed_report),
        Trial::test("run_items_shape", test_run_items_shape),
        Trial::test("run_json_in_stdout", test_run_json_in_stdout),
        Trial::test("run_degraded_output", test_run_degraded_output),
        Trial::test("run_timeout", test_run_timeout),
        Trial::test("run_text_output", test_run_text_output),
        Trial::test("run_default_command", test_run_default_command),
    ]
    .into_iter()
    .map(|trial| trial.with_ignored_flag(!cfg!(unix)))
    .chain([
        Trial::test("run_missing_executable", test_run_missing_executable),
        Trial::test("run_unknown_request", test_run_unknown_request),
        Trial::test("run_unknown_environment", test_run_unknown_environment),
        Trial::test("run_invalid_variable_format", test_run_invalid_variable_format),
        Trial::test("run_invalid_env_name", test_run_invalid_env_name),
        Trial::test("run_name_conflicts_with_folder", test_run_name_conflicts_with_folder),
    ])
    .collect();

    run(&args, trials).exit();
}

/// `bruq --executable sh request run -s users-api ...` with the fake runner
/// configured through the environment.
fn fake_run(args: &[&str], report: Option<&str>, stdout: Option<&str>, exit: i32) -> Command {
    let mut cmd = bruq_cmd();
    cmd.args(["--executable", "sh", "request", "run", "-s", USERS_API])
        .args(args)
        .env("BRUQ_FAKE_EXIT", exit.to_string());
    if let Some(report) = report {
        cmd.env("BRUQ_FAKE_REPORT", fixture(&format!("tests/fixtures/reports/{report}")));
    }
    if let Some(stdout) = stdout {
        cmd.env("BRUQ_FAKE_STDOUT", fixture(&format!("tests/fixtures/reports/{stdout}")));
    }
    cmd
}

fn output_of(mut cmd: Command) -> Result<Output, Failed> {
    cmd.output()
        .map_err(|e| Failed::from(format!("Failed to execute command: {e}")))
}

fn json_stdout(output: &Output) -> Result<Value, Failed> {
    serde_json::from_str(&stdout_of(output)).map_err(|e| {
        Failed::from(format!(
            "Invalid JSON ({e}). stdout:\n{}\nstderr:\n{}",
            stdout_of(output),
            stderr_of(output)
        ))
    })
}

fn expect_code(output: &Output, code: i32) -> Result<(), Failed> {
    if output.status.code() == Some(code) {
        Ok(())
    } else {
        Err(format!(
            "Expected exit code {code}, got {:?}. stderr: {}",
            output.status.code(),
            stderr_of(output)
        )
        .into())
    }
}

fn test_run_single_request_json() -> Result<(), Failed> {
    let output = output_of(fake_run(
        &["-n", "List Users", "-o", "json"],
        Some("results.json"),
        None,
        0,
    ))?;
    expect_code(&output, 0)?;
    assert_json_subset(
        &json!({
            "exitCode": 0,
            "shape": "results",
            "summary": {"total": 2, "passed": 2, "failed": 0, "totalDurationMs": 57},
            "results": [
                {
                    "name": "users/list-users.bru",
                    "passed": true,
                    "httpStatus": 200,
                    "durationMs": 21,
                    "request": {"method": "GET", "url": "http://localhost:3000/users"},
                    "response": {"status": 200, "statusText": "OK"},
                    "assertions": [{"name": "returns 200", "passed": true}]
                },
                {"name": "users/create-user.bru", "httpStatus": 201}
            ]
        }),
        &json_stdout(&output)?,
    )
    .map_err(Failed::from)
}

fn test_run_passes_arguments() -> Result<(), Failed> {
    let log_dir = tempfile::tempdir().map_err(|e| Failed::from(e.to_string()))?;
    let log = log_dir.path().join("args.txt");

    let mut cmd = fake_run(
        &["-n", "List Users", "-e", "prod", "-v", "token=abc", "-o", "json"],
        Some("results.json"),
        None,
        0,
    );
    cmd.env("BRUQ_FAKE_ARGS_LOG", &log);
    expect_code(&output_of(cmd)?, 0)?;

    let args = std::fs::read_to_string(&log).map_err(|e| Failed::from(e.to_string()))?;
    let expected = "users/list-users.bru --env prod --env-var token=abc --reporter-json ";
    if !args.starts_with(expected) || !args.contains("bruq-run-") {
        return Err(format!("Unexpected runner arguments: {args}").into());
    }
    Ok(())
}

fn test_run_whole_collection() -> Result<(), Failed> {
    let log_dir = tempfile::tempdir().map_err(|e| Failed::from(e.to_string()))?;
    let log = log_dir.path().join("args.txt");

    let mut cmd = fake_run(&["-o", "json"], Some("results.json"), None, 0);
    cmd.env("BRUQ_FAKE_ARGS_LOG", &log);
    let output = output_of(cmd)?;
    expect_code(&output, 0)?;

    let args = std::fs::read_to_string(&log).map_err(|e| Failed::from(e.to_string()))?;
    if !args.starts_with("-r --reporter-json ") {
        return Err(format!("Unexpected runner arguments: {args}").into());
    }
    Ok(())
}

fn test_run_folder() -> Result<(), Failed> {
    let log_dir = tempfile::tempdir().map_err(|e| Failed::from(e.to_string()))?;
    let log = log_dir.path().join("args.txt");

    let mut cmd = fake_run(&["--folder", "users", "-o", "json"], Some("results.json"), None, 0);
    cmd.env("BRUQ_FAKE_ARGS_LOG", &log);
    expect_code(&output_of(cmd)?, 0)?;

    let args = std::fs::read_to_string(&log).map_err(|e| Failed::from(e.to_string()))?;
    if !args.starts_with("users -r --reporter-json ") {
        return Err(format!("Unexpected runner arguments: {args}").into());
    }

    let missing = output_of(fake_run(&["--folder", "orders"], None, None, 0))?;
    expect_code(&missing, 4)
}

fn test_run_failed_report() -> Result<(), Failed> {
    let output = output_of(fake_run(
        &["-n", "Create User", "-o", "json"],
        Some("failed.json"),
        None,
        1,
    ))?;
    expect_code(&output, 8)?;
    assert_json_subset(
        &json!({
            "exitCode": 1,
            "summary": {"total": 1, "passed": 0, "failed": 1, "totalDurationMs": 12},
            "results": [{
                "name": "users/create-user",
                "passed": false,
                "httpStatus": 500,
                "error": "expected 201 but got 500",
                "assertions": [{"name": "returns 201", "passed": false, "error": "expected 500 to equal 201"}]
            }]
        }),
        &json_stdout(&output)?,
    )
    .map_err(Failed::from)
}

fn test_run_items_shape() -> Result<(), Failed> {
    let output = output_of(fake_run(&["-n", "Ping", "-o", "json"], Some("items.json"), None, 0))?;
    expect_code(&output, 0)?;
    assert_json_subset(
        &json!({
            "shape": "items",
            "summary": {"total": 1, "passed": 1, "failed": 0},
            "results": [{"name": "Ping", "passed": true, "httpStatus": 200, "durationMs": 4}]
        }),
        &json_stdout(&output)?,
    )
    .map_err(Failed::from)
}

fn test_run_json_in_stdout() -> Result<(), Failed> {
    let output = output_of(fake_run(
        &["-n", "List Users", "-o", "json"],
        None,
        Some("stdout_with_logs.txt"),
        0,
    ))?;
    expect_code(&output, 0)?;
    assert_json_subset(
        &json!({
            "shape": "results",
            "summary": {"total": 1, "passed": 1},
            "results": [{"name": "List Users", "httpStatus": 200, "durationMs": 9}]
        }),
        &json_stdout(&output)?,
    )
    .map_err(Failed::from)
}

fn test_run_degraded_output() -> Result<(), Failed> {
    let output = output_of(fake_run(
        &["-n", "Ping", "-o", "json"],
        None,
        Some("stdout_plain.txt"),
        2,
    ))?;
    expect_code(&output, 8)?;
    assert_json_subset(
        &json!({
            "exitCode": 2,
            "shape": "unrecognized",
            "summary": {"total": 0, "passed": 0, "failed": 0, "totalDurationMs": 0},
            "results": [],
            "rawStdout": "Error: could not connect to localhost:3000\n"
        }),
        &json_stdout(&output)?,
    )
    .map_err(Failed::from)
}

fn test_run_timeout() -> Result<(), Failed> {
    let mut cmd = bruq_cmd();
    cmd.args([
        "--executable",
        "sh",
        "--timeout",
        "1",
        "request",
        "run",
        "-s",
        USERS_API,
        "-n",
        "Ping",
    ])
    .env("BRUQ_FAKE_SLEEP", "20")
    .env("BRUQ_FAKE_REPORT", fixture("tests/fixtures/reports/results.json"));

    let started = Instant::now();
    let output = output_of(cmd)?;
    expect_code(&output, 7)?;
    if started.elapsed() > Duration::from_secs(15) {
        return Err("Timed-out run was not killed promptly".into());
    }
    if !stdout_of(&output).is_empty() {
        return Err("A timed-out run must not print partial results".into());
    }
    if !stderr_of(&output).contains("timed out") {
        return Err(format!("Unexpected error: {}", stderr_of(&output)).into());
    }
    Ok(())
}

fn test_run_text_output() -> Result<(), Failed> {
    let output = output_of(fake_run(&["-n", "Create User"], Some("failed.json"), None, 1))?;
    expect_code(&output, 8)?;
    let stdout = stdout_of(&output);
    for needle in [
        "summary: 0 passed, 1 failed, 1 total in 12 ms",
        "name: users/create-user",
        "result: FAIL",
        "status: 500",
        "- FAIL returns 201: expected 500 to equal 201",
    ] {
        if !stdout.contains(needle) {
            return Err(format!("Output missing '{needle}':\n{stdout}").into());
        }
    }
    Ok(())
}

fn test_run_default_command() -> Result<(), Failed> {
    let mut cmd = bruq_cmd();
    cmd.current_dir(fixture(USERS_API))
        .env("BRUQ_EXECUTABLE", "sh")
        .env("BRUQ_FAKE_REPORT", fixture("tests/fixtures/reports/results.json"));
    let output = output_of(cmd)?;
    expect_code(&output, 0)?;
    if !stdout_of(&output).contains("2 passed, 0 failed, 2 total") {
        return Err(format!("Unexpected output:\n{}", stdout_of(&output)).into());
    }
    Ok(())
}

fn test_run_missing_executable() -> Result<(), Failed> {
    let mut cmd = bruq_cmd();
    cmd.args([
        "--executable",
        "bruq-no-such-runner",
        "request",
        "run",
        "-s",
        USERS_API,
        "-n",
        "Ping",
    ]);
    let output = output_of(cmd)?;
    expect_code(&output, 6)?;
    if !stderr_of(&output).contains("Executable not found: 'bruq-no-such-runner'") {
        return Err(format!("Unexpected error: {}", stderr_of(&output)).into());
    }
    Ok(())
}

fn test_run_unknown_request() -> Result<(), Failed> {
    let output = output_of(fake_run(&["-n", "Nope"], None, None, 0))?;
    expect_code(&output, 5)
}

fn test_run_unknown_environment() -> Result<(), Failed> {
    let mut cmd = bruq_cmd();
    cmd.args([
        "--executable",
        "bruq-no-such-runner",
        "request",
        "run",
        "-s",
        USERS_API,
        "-n",
        "Ping",
        "-e",
        "staging",
    ]);
    // The environment is checked before anything is spawned.
    expect_code(&output_of(cmd)?, 3)
}

fn test_run_invalid_variable_format() -> Result<(), Failed> {
    let output = output_of(fake_run(&["-n", "Ping", "-v", "novalue"], None, None, 0))?;
    expect_code(&output, 2)?;
    if !stderr_of(&output).contains("NAME=VALUE") {
        return Err(format!("Unexpected error: {}", stderr_of(&output)).into());
    }
    Ok(())
}

fn test_run_invalid_env_name() -> Result<(), Failed> {
    let output = output_of(fake_run(&["-n", "Ping", "-e", "../etc"], None, None, 0))?;
    expect_code(&output, 2)
}

fn test_run_name_conflicts_with_folder() -> Result<(), Failed> {
    let output = output_of(fake_run(&["-n", "Ping", "--folder", "users"], None, None, 0))?;
    expect_code(&output, 2)
}

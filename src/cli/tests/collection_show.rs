mod common;
use common::{assert_json_subset, bruq_cmd, run_json, run_ok, stdout_of, LEGACY_API, USERS_API, WORKSPACE};
use serde_json::json;

#[test]
fn test_collection_show_json() -> Result<(), String> {
    let json = run_json(&["collection", "show", "-s", USERS_API, "-o", "json"])?;
    assert_json_subset(
        &json!({
            "name": "Users API",
            "version": "1",
            "requestCount": 3,
            "environmentCount": 2,
            "path": "{{regex:users-api$}}"
        }),
        &json,
    )
}

#[test]
fn test_collection_show_not_a_collection() -> Result<(), String> {
    let output = bruq_cmd()
        .args(["collection", "show", "-s", WORKSPACE])
        .output()
        .map_err(|e| e.to_string())?;
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Not a collection"), "{stderr}");
    Ok(())
}

#[test]
fn test_collection_validate_clean() -> Result<(), String> {
    let stdout = run_ok(&["collection", "validate", "-s", USERS_API])?;
    assert_eq!(stdout.trim(), "No problems found");
    Ok(())
}

#[test]
fn test_collection_validate_reports_problems() -> Result<(), String> {
    let output = bruq_cmd()
        .args(["collection", "validate", "-s", LEGACY_API, "-o", "json"])
        .output()
        .map_err(|e| e.to_string())?;
    assert_eq!(output.status.code(), Some(9));

    let json: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).map_err(|e| e.to_string())?;
    assert_json_subset(
        &json!([
            {
                "file": "orders/get-order.bru",
                "warnings": [
                    {"kind": "duplicate_block", "line": 15},
                    {"kind": "malformed_line", "line": 12}
                ]
            },
            {
                "file": "orders/draft.bru",
                "warnings": [{"kind": "multiple_methods", "line": 9}]
            }
        ]),
        &json,
    )
}

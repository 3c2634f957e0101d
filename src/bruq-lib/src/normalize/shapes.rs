//! One adapter per historical payload shape. Each is a pure function from the
//! parsed payload to a result, returning `None` when the shape does not apply.

use super::models::{
    AssertionResult, CanonicalRunResult, PayloadShape, RequestSnapshot, ResponseSnapshot,
    RunItemResult, RunSummary,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type ShapeAdapter = fn(&Value) -> Option<CanonicalRunResult>;

/// Priority order; the first adapter that recognizes the payload wins.
pub const SHAPE_ADAPTERS: &[ShapeAdapter] = &[results_shape, items_shape, summary_only_shape];

pub const UNKNOWN_NAME: &str = "Unknown";

const SUMMARY_TOTAL: &[&str] = &["totalRequests", "total"];
const SUMMARY_PASSED: &[&str] = &["passedRequests", "passed"];
const SUMMARY_FAILED: &[&str] = &["failedRequests", "failed"];
const SUMMARY_DURATION: &[&str] = &["totalDuration", "totalDurationMs", "duration"];

const RESULT_NAME: &[&str] = &["suitename", "name", "test.filename"];
const ITEM_NAME: &[&str] = &["name", "request.name", "item.name", "filename"];

/// Historical names for per-request test outcomes; `assertionResults` is
/// appended after whichever of these is present.
const TEST_LISTS: &[&str] = &["testResults", "tests", "assertions"];
const ASSERTION_LIST: &str = "assertionResults";

/// Current executor output: `{summary?, results: [...]}`.
pub fn results_shape(payload: &Value) -> Option<CanonicalRunResult> {
    let results = payload.get("results")?.as_array()?;
    let items: Vec<RunItemResult> = results.iter().map(result_entry).collect();
    Some(CanonicalRunResult {
        shape: PayloadShape::Results,
        summary: summarize(payload.get("summary"), &items),
        results: items,
        ..Default::default()
    })
}

/// Older output listing `items` instead of `results`.
pub fn items_shape(payload: &Value) -> Option<CanonicalRunResult> {
    let items = payload.get("items")?.as_array()?;
    let entries: Vec<RunItemResult> = items.iter().map(item_entry).collect();
    let summary_source = payload.get("summary").or_else(|| payload.get("stats"));
    Some(CanonicalRunResult {
        shape: PayloadShape::Items,
        summary: summarize(summary_source, &entries),
        results: entries,
        ..Default::default()
    })
}

/// Only totals were reported, no per-request detail.
pub fn summary_only_shape(payload: &Value) -> Option<CanonicalRunResult> {
    let summary = payload.get("summary")?;
    if !summary.is_object() {
        return None;
    }
    Some(CanonicalRunResult {
        shape: PayloadShape::SummaryOnly,
        summary: summarize(Some(summary), &[]),
        ..Default::default()
    })
}

fn result_entry(entry: &Value) -> RunItemResult {
    let error = error_text(entry.get("error"));
    RunItemResult {
        name: first_str(entry, RESULT_NAME).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        passed: error.is_none(),
        http_status: http_status(entry),
        duration_ms: duration_ms(entry),
        error,
        request: request_snapshot(entry.get("request")),
        response: response_snapshot(entry.get("response")),
        assertions: assertions(entry),
    }
}

fn item_entry(entry: &Value) -> RunItemResult {
    let error = error_text(entry.get("error"));
    let passed = entry
        .get("passed")
        .and_then(Value::as_bool)
        .or_else(|| entry.get("status").and_then(Value::as_str).and_then(status_word))
        .unwrap_or(error.is_none());
    RunItemResult {
        name: first_str(entry, ITEM_NAME).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        passed,
        http_status: first_u64(entry, &["response.status", "response.code", "statusCode"])
            .or_else(|| first_u64(entry, &["status"]))
            .and_then(|s| u16::try_from(s).ok()),
        duration_ms: duration_ms(entry),
        error,
        request: request_snapshot(entry.get("request")),
        response: response_snapshot(entry.get("response")),
        assertions: assertions(entry),
    }
}

fn summarize(summary: Option<&Value>, items: &[RunItemResult]) -> RunSummary {
    let upstream = summary.filter(|s| s.is_object());
    let from_upstream = |aliases: &[&str]| upstream.and_then(|s| first_u64(s, aliases));

    let total = from_upstream(SUMMARY_TOTAL).unwrap_or(items.len() as u64);
    let passed = from_upstream(SUMMARY_PASSED)
        .unwrap_or_else(|| items.iter().filter(|i| i.passed).count() as u64);
    let failed = from_upstream(SUMMARY_FAILED).unwrap_or_else(|| total.saturating_sub(passed));
    let total_duration_ms = from_upstream(SUMMARY_DURATION)
        .unwrap_or_else(|| items.iter().map(|i| i.duration_ms).sum());

    RunSummary {
        total,
        passed,
        failed,
        total_duration_ms,
    }
}

fn assertions(entry: &Value) -> Vec<AssertionResult> {
    let primary = TEST_LISTS
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_array));
    let secondary = entry.get(ASSERTION_LIST).and_then(Value::as_array);

    primary
        .into_iter()
        .chain(secondary)
        .flatten()
        .map(assertion)
        .collect()
}

fn assertion(value: &Value) -> AssertionResult {
    let error = error_text(value.get("error"));
    let name = first_str(value, &["description", "name"]).unwrap_or_else(|| {
        let lhs = value.get("lhsExpr").and_then(Value::as_str).unwrap_or_default();
        let rhs = value.get("rhsExpr").and_then(Value::as_str).unwrap_or_default();
        let joined = format!("{lhs} {rhs}").trim().to_string();
        if joined.is_empty() {
            UNKNOWN_NAME.to_string()
        } else {
            joined
        }
    });
    let passed = value
        .get("passed")
        .and_then(Value::as_bool)
        .or_else(|| value.get("status").and_then(Value::as_str).and_then(status_word))
        .unwrap_or(error.is_none());
    AssertionResult {
        name,
        passed,
        error,
    }
}

fn status_word(status: &str) -> Option<bool> {
    match status.to_ascii_lowercase().as_str() {
        "pass" | "passed" | "success" | "ok" => Some(true),
        "fail" | "failed" | "error" | "failure" => Some(false),
        _ => None,
    }
}

fn http_status(entry: &Value) -> Option<u16> {
    first_u64(entry, &["response.status", "status"]).and_then(|s| u16::try_from(s).ok())
}

fn duration_ms(entry: &Value) -> u64 {
    if let Some(ms) = first_u64(
        entry,
        &["response.responseTime", "responseTime", "durationMs", "duration"],
    ) {
        return ms;
    }
    // `runtime` is reported in seconds.
    lookup(entry, "runtime")
        .and_then(Value::as_f64)
        .map(|secs| (secs * 1000.0).round() as u64)
        .unwrap_or(0)
}

fn request_snapshot(value: Option<&Value>) -> RequestSnapshot {
    let Some(value) = value.filter(|v| v.is_object()) else {
        return RequestSnapshot::default();
    };
    RequestSnapshot {
        method: first_str(value, &["method"]),
        url: first_str(value, &["url"]),
        headers: string_map(value.get("headers")),
        body: value
            .get("data")
            .or_else(|| value.get("body"))
            .filter(|b| !b.is_null())
            .cloned(),
    }
}

fn response_snapshot(value: Option<&Value>) -> ResponseSnapshot {
    let Some(value) = value.filter(|v| v.is_object()) else {
        return ResponseSnapshot::default();
    };
    ResponseSnapshot {
        status: first_u64(value, &["status", "code"]).and_then(|s| u16::try_from(s).ok()),
        status_text: first_str(value, &["statusText", "status_text"]),
        headers: string_map(value.get("headers")),
        body: value
            .get("data")
            .or_else(|| value.get("body"))
            .filter(|b| !b.is_null())
            .cloned(),
        response_time_ms: first_u64(value, &["responseTime", "responseTimeMs"]),
    }
}

/// Value at a dotted path such as `test.filename`.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

fn first_str(value: &Value, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        lookup(value, alias)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// First alias holding a non-negative number (or a numeric string).
fn first_u64(value: &Value, aliases: &[&str]) -> Option<u64> {
    aliases.iter().find_map(|alias| {
        let v = lookup(value, alias)?;
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

fn error_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => Some(object_message(map)),
        other => Some(other.to_string()),
    }
}

fn object_message(map: &Map<String, Value>) -> String {
    map.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| Value::Object(map.clone()).to_string())
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };
    map.iter()
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_results_shape_with_summary_aliases() {
        let payload = json!({
            "summary": {"total": 3, "passed": 2, "failed": 1, "totalDuration": 90},
            "results": [
                {"name": "a", "error": null},
                {"name": "b", "error": null},
                {"name": "c", "error": "boom"}
            ]
        });
        let result = results_shape(&payload).unwrap();
        assert_eq!(
            result.summary,
            RunSummary {
                total: 3,
                passed: 2,
                failed: 1,
                total_duration_ms: 90
            }
        );
        assert_eq!(result.results[2].error.as_deref(), Some("boom"));
        assert!(!result.results[2].passed);
    }

    #[test]
    fn test_first_present_alias_wins() {
        let payload = json!({
            "summary": {"totalRequests": 2, "total": 99, "passedRequests": 2},
            "results": [{"name": "a"}, {"name": "b"}]
        });
        let summary = results_shape(&payload).unwrap().summary;
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_missing_summary_is_folded_from_results() {
        let payload = json!({
            "results": [
                {"name": "a", "error": null, "response": {"responseTime": 10}},
                {"name": "b", "error": {"message": "timeout"}, "response": {"responseTime": 25}},
                {"name": "c", "runtime": 0.5}
            ]
        });
        let result = results_shape(&payload).unwrap();
        assert_eq!(result.summary.total, result.results.len() as u64);
        assert_eq!(result.summary.passed, 2);
        assert_eq!(result.summary.failed, 1);
        assert_eq!(result.summary.total_duration_ms, 535);
        assert_eq!(result.results[1].error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_result_name_aliases() {
        let payload = json!({
            "results": [
                {"suitename": "suite", "name": "ignored"},
                {"name": "plain"},
                {"test": {"filename": "folder/file.bru"}},
                {"error": null}
            ]
        });
        let names: Vec<_> = results_shape(&payload)
            .unwrap()
            .results
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["suite", "plain", "folder/file.bru", "Unknown"]);
    }

    #[test]
    fn test_assertions_union_in_source_order() {
        let payload = json!({
            "results": [{
                "name": "a",
                "error": null,
                "testResults": [
                    {"description": "status is 200", "status": "pass"},
                    {"description": "has body", "status": "fail", "error": "body empty"}
                ],
                "assertionResults": [
                    {"lhsExpr": "res.status", "rhsExpr": "eq 200", "status": "pass"}
                ]
            }]
        });
        let assertions = results_shape(&payload).unwrap().results[0].assertions.clone();
        assert_eq!(
            assertions,
            vec![
                AssertionResult {
                    name: "status is 200".into(),
                    passed: true,
                    error: None
                },
                AssertionResult {
                    name: "has body".into(),
                    passed: false,
                    error: Some("body empty".into())
                },
                AssertionResult {
                    name: "res.status eq 200".into(),
                    passed: true,
                    error: None
                },
            ]
        );
    }

    #[test]
    fn test_request_and_response_snapshots() {
        let payload = json!({
            "results": [{
                "name": "create",
                "request": {
                    "method": "POST",
                    "url": "https://a.test/users",
                    "headers": {"content-type": "application/json", "x-retry": 2},
                    "data": {"name": "Ada"}
                },
                "response": {
                    "status": 201,
                    "statusText": "Created",
                    "headers": {"location": "/users/1"},
                    "data": {"id": 1},
                    "responseTime": 42
                }
            }]
        });
        let item = results_shape(&payload).unwrap().results.remove(0);
        assert_eq!(item.http_status, Some(201));
        assert_eq!(item.duration_ms, 42);
        assert_eq!(item.request.method.as_deref(), Some("POST"));
        assert_eq!(item.request.headers["x-retry"], "2");
        assert_eq!(item.request.body, Some(json!({"name": "Ada"})));
        assert_eq!(item.response.status_text.as_deref(), Some("Created"));
        assert_eq!(item.response.body, Some(json!({"id": 1})));
        assert_eq!(item.response.response_time_ms, Some(42));
    }

    #[test]
    fn test_items_shape() {
        let payload = json!({
            "items": [
                {"request": {"name": "list"}, "status": "passed", "statusCode": 200, "duration": 5},
                {"filename": "create.bru", "status": "failed", "error": "500"},
                {"name": "ping", "passed": true}
            ]
        });
        assert!(results_shape(&payload).is_none());
        let result = items_shape(&payload).unwrap();
        assert_eq!(result.shape, PayloadShape::Items);
        let names: Vec<_> = result.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["list", "create.bru", "ping"]);
        assert_eq!(result.results[0].http_status, Some(200));
        assert!(!result.results[1].passed);
        assert_eq!(result.summary.total, 3);
        assert_eq!(result.summary.passed, 2);
        assert_eq!(result.summary.total_duration_ms, 5);
    }

    #[test]
    fn test_summary_only_shape() {
        let payload = json!({"summary": {"totalRequests": 4, "passedRequests": 4}});
        let result = summary_only_shape(&payload).unwrap();
        assert_eq!(result.summary.total, 4);
        assert_eq!(result.summary.failed, 0);
        assert!(result.results.is_empty());
    }

    #[test]
    fn test_adapters_reject_unrelated_payloads() {
        let payload = json!({"version": "1.0", "name": "collection"});
        assert!(SHAPE_ADAPTERS.iter().all(|adapter| adapter(&payload).is_none()));
        assert!(results_shape(&json!({"results": "nope"})).is_none());
    }
}

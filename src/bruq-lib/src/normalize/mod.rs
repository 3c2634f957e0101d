//! Turns whatever the executor produced into one [`CanonicalRunResult`].
//!
//! The payload is taken from the JSON artifact when there is one, otherwise
//! from JSON found in stdout. Each known historical shape has an adapter in
//! [`shapes`]; they are tried in priority order and the first match wins.
//! Nothing here fails: an unknown shape yields a degraded result that keeps
//! the raw output for display.

pub mod models;
pub mod shapes;

pub use models::{
    AssertionResult, CanonicalRunResult, PayloadShape, RawOutput, RequestSnapshot,
    ResponseSnapshot, RunItemResult, RunSummary,
};

use serde_json::Value;

pub fn normalize(raw: &RawOutput, artifact: Option<&Value>) -> CanonicalRunResult {
    let from_artifact = artifact.and_then(normalize_payload);
    let recognized = from_artifact.or_else(|| {
        extract_json(&raw.stdout)
            .as_ref()
            .and_then(normalize_payload)
    });

    match recognized {
        Some(mut result) => {
            result.exit_code = raw.exit_code;
            result
        }
        None => {
            log::debug!("No recognizable run payload; keeping raw output");
            CanonicalRunResult {
                exit_code: raw.exit_code,
                shape: PayloadShape::Unrecognized,
                raw_stdout: Some(raw.stdout.clone()),
                raw_stderr: Some(raw.stderr.clone()),
                ..Default::default()
            }
        }
    }
}

/// Applies the shape adapters to a parsed payload. A single-element array is
/// unwrapped first.
pub fn normalize_payload(payload: &Value) -> Option<CanonicalRunResult> {
    let payload = unwrap_single(payload);
    shapes::SHAPE_ADAPTERS.iter().find_map(|adapter| adapter(payload))
}

fn unwrap_single(payload: &Value) -> &Value {
    match payload.as_array() {
        Some(items) if items.len() == 1 => &items[0],
        _ => payload,
    }
}

/// First JSON value in `stdout`: the whole text, or a value starting on a
/// line that opens with `{` or `[` (human-readable logging may precede it).
pub fn extract_json(stdout: &str) -> Option<Value> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    let mut offset = 0usize;
    for line in stdout.split_inclusive('\n') {
        let start = line.trim_start();
        if start.starts_with('{') || start.starts_with('[') {
            let begin = offset + (line.len() - start.len());
            let mut stream =
                serde_json::Deserializer::from_str(&stdout[begin..]).into_iter::<Value>();
            if let Some(Ok(value)) = stream.next() {
                if value.is_object() || value.is_array() {
                    return Some(value);
                }
            }
        }
        offset += line.len();
    }
    None
}

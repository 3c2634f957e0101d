use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// What the executor handed back for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Which adapter recognized the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    Results,
    Items,
    SummaryOnly,
    #[default]
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub total_duration_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    pub method: Option<String>,
    pub url: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
    pub response_time_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionResult {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunItemResult {
    pub name: String,
    pub passed: bool,
    pub http_status: Option<u16>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub request: RequestSnapshot,
    pub response: ResponseSnapshot,
    pub assertions: Vec<AssertionResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRunResult {
    pub exit_code: i32,
    pub shape: PayloadShape,
    pub summary: RunSummary,
    pub results: Vec<RunItemResult>,
    /// Only kept when no payload could be recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_stderr: Option<String>,
}

impl CanonicalRunResult {
    pub fn is_degraded(&self) -> bool {
        self.shape == PayloadShape::Unrecognized
    }

    /// The run finished cleanly and nothing failed.
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0 && self.summary.failed == 0
    }
}

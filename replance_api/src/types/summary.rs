//! Generated overview served by `/api/events-summary`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Either `{summary, lastUpdated, eventCount}` or `{error}`.
///
/// The backend answers HTTP 200 in both cases, so the error flag has to be
/// inspected on the payload itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Markdown-formatted overview.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Error flag. The backend sends a message string; any truthy value counts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_count: Option<u64>,
}

impl SummaryResponse {
    /// Whether the payload carries a truthy error flag.
    pub fn has_error(&self) -> bool {
        match &self.error {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// The summary text, or `None` when flagged as an error or empty.
    pub fn into_summary(self) -> Option<String> {
        if self.has_error() {
            return None;
        }
        self.summary.filter(|s| !s.is_empty())
    }
}

use std::num::FpCategory;

use serde_json::{Map, Value};
use tracing::debug;

/// One decoded event from the try-on progress stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Work in progress, `percent` in 0..=100
    Progress {
        /// Completion percentage as reported by the server
        percent: f64,
        /// Optional status label sent next to the percentage
        status: Option<String>,
    },
    /// Terminal success carrying the composited image (data URL or URL)
    Result {
        /// Image reference to display
        image: String,
    },
    /// Terminal failure reported by the server
    Error {
        /// Message to surface verbatim
        message: String,
    },
}

const PROGRESS: &str = "progress";
const STATUS: &str = "status";
const RESULT_IMAGE: &str = "resultImage";
const ERROR: &str = "error";

impl StreamEvent {
    /// Parses a frame's JSON payload.
    ///
    /// A `progress` key takes the progress branch whenever it is present, even
    /// as `null`. Otherwise a truthy `resultImage` wins over a truthy `error`.
    /// Empty strings, `0`, `false` and `null` count as absent. Returns `Ok(None)`
    /// for objects that select no event, and for a `progress` that is neither a
    /// number nor a numeric string.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the payload is not a JSON object.
    pub fn from_payload(payload: &str) -> Result<Option<Self>, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(payload)?;

        if let Some(progress) = fields.get(PROGRESS) {
            let Some(percent) = as_percent(progress) else {
                debug!(%progress, "progress without a numeric value");
                return Ok(None);
            };
            let status = fields.get(STATUS).and_then(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            });
            return Ok(Some(Self::Progress { percent, status }));
        }
        if let Some(image) = fields.get(RESULT_IMAGE).and_then(truthy_text) {
            return Ok(Some(Self::Result { image }));
        }
        if let Some(message) = fields.get(ERROR).and_then(truthy_text) {
            return Ok(Some(Self::Error { message }));
        }
        Ok(None)
    }

    /// Returns true for `Result` and `Error`, which end a submission.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Result { .. } | Self::Error { .. })
    }
}

fn as_percent(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|p| p.is_finite()),
        _ => None,
    }
}

/// Text of a field that is set to something other than `null`, `false`, `0` or `""`.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.classify() == FpCategory::Zero) => None,
        other => Some(other.to_string()),
    }
}

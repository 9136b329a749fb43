//! Wire types: the script request body, a decoded `Step`, and the
//! structured results (events and the terminal result) returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One element of a script: a keyed record decoded from JSON. `action` is
/// required; the universal optional fields are lifted out, everything else
/// stays in `args` for handlers to read after interpolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub action: String,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_: Option<String>,

    /// Control-flow sub-step sequences, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<Vec<Step>>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_: Option<Vec<Step>>,
    #[serde(rename = "do", default, skip_serializing_if = "Option::is_none")]
    pub do_: Option<Vec<Step>>,
    #[serde(rename = "try", default, skip_serializing_if = "Option::is_none")]
    pub try_: Option<Vec<Step>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch: Option<Vec<Step>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finally: Option<Vec<Step>>,

    /// Every other action-specific key, kept as raw JSON until the
    /// Interpolator resolves it at dispatch entry.
    #[serde(flatten)]
    pub args: Map<String, Value>,
}

impl Step {
    /// Read a raw arg as a JSON value.
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Read a raw arg coerced to a string (only for already-resolved steps).
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }

    pub fn arg_f64(&self, key: &str) -> Option<f64> {
        self.args.get(key).and_then(Value::as_f64)
    }

    pub fn arg_bool(&self, key: &str) -> Option<bool> {
        self.args.get(key).and_then(Value::as_bool)
    }

    pub fn arg_u64(&self, key: &str) -> Option<u64> {
        self.args.get(key).and_then(Value::as_u64)
    }
}

#[cfg(test)]
impl Default for Step {
    fn default() -> Self {
        Step {
            action: String::new(),
            optional: false,
            timeout: None,
            id: None,
            as_: None,
            then: None,
            else_: None,
            do_: None,
            try_: None,
            catch: None,
            finally: None,
            args: Map::new(),
        }
    }
}

/// The POST /script and /script/stream request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptRequest {
    pub steps: Vec<Step>,
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
}

/// A rectangle, as returned by `getRect` and element descriptors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Element Cache descriptor, populated by `findElements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub label: Option<String>,
    pub value: Option<String>,
    pub identifier: Option<String>,
    pub is_enabled: bool,
    pub is_hittable: bool,
}

/// Step lifecycle events emitted to the stream sink (§3).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum StepEvent {
    #[serde(rename = "start")]
    Start { timestamp_ms: i64, total_steps: usize },

    #[serde(rename = "step_start")]
    StepStart {
        timestamp_ms: i64,
        index: usize,
        action: String,
        step_id: Option<String>,
    },

    #[serde(rename = "step_complete")]
    StepComplete {
        timestamp_ms: i64,
        index: usize,
        action: String,
        success: bool,
        duration_ms: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    #[serde(rename = "log")]
    Log {
        timestamp_ms: i64,
        level: String,
        message: String,
    },

    #[serde(rename = "result")]
    Result {
        timestamp_ms: i64,
        key: String,
        value: String,
    },

    #[serde(rename = "screenshot")]
    Screenshot {
        timestamp_ms: i64,
        key: String,
        size: usize,
    },

    #[serde(rename = "done")]
    Done {
        timestamp_ms: i64,
        success: bool,
        duration_ms: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        stopped_at: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// The JSON object returned by `POST /script`, and the final SSE event.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalResult {
    pub success: bool,
    pub results: Map<String, Value>,
    pub variables: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step_id: Option<String>,
    #[serde(rename = "break", skip_serializing_if = "std::ops::Not::not")]
    pub did_break: bool,
    pub duration_ms: i64,
}

#[cfg(test)]
mod model_test;

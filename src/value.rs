//! The Value Store (C3): two keyed maps scoped per script execution.
//!
//! *Results* is stringly-typed and always observable. *Variables* is typed
//! and used for interpolation and computation. A write to both uses the
//! canonical string coercion of the variables entry.

use crate::constants::{
    SUFFIX_CENTER_X, SUFFIX_CENTER_Y, SUFFIX_COUNT, SUFFIX_DAY, SUFFIX_FOUND, SUFFIX_HEIGHT,
    SUFFIX_HOUR, SUFFIX_MINUTE, SUFFIX_MONTH, SUFFIX_TIMESTAMP, SUFFIX_WIDTH, SUFFIX_X,
    SUFFIX_YEAR,
};
use crate::model::{ElementDescriptor, Rect};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A typed value in the *variables* map. Compound values (lists of element
/// descriptors, keyed records) live only here; the *results* mirror is
/// always their canonical string coercion.
#[derive(Debug, Clone)]
pub enum VarValue {
    String(String),
    Number(f64),
    Bool(bool),
    /// Unix timestamp, seconds.
    Date(i64),
    Sequence(Vec<VarValue>),
    Record(HashMap<String, VarValue>),
    Null,
}

impl VarValue {
    /// Canonical string coercion used for the *results* mirror (§3 invariant):
    /// numbers via shortest round-trip, booleans as `"true"`/`"false"`,
    /// missing/null as empty string.
    pub fn coerce_string(&self) -> String {
        match self {
            VarValue::String(s) => s.clone(),
            VarValue::Number(n) => format_number(*n),
            VarValue::Bool(b) => b.to_string(),
            VarValue::Date(ts) => ts.to_string(),
            VarValue::Null => String::new(),
            VarValue::Sequence(items) => items.len().to_string(),
            VarValue::Record(_) => String::new(),
        }
    }

    /// Truthy coercion used by `if`/`while`/boolean Conditions: numeric
    /// non-zero, non-empty string not equal to "false", non-empty
    /// array/object, explicit bool.
    pub fn truthy(&self) -> bool {
        match self {
            VarValue::Bool(b) => *b,
            VarValue::Number(n) => *n != 0.0,
            VarValue::String(s) => !s.is_empty() && s != "false" && s != "0",
            VarValue::Date(_) => true,
            VarValue::Sequence(items) => !items.is_empty(),
            VarValue::Record(map) => !map.is_empty(),
            VarValue::Null => false,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            VarValue::Number(n) => Some(*n),
            VarValue::String(s) => s.parse().ok(),
            VarValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            VarValue::Date(ts) => Some(*ts as f64),
            _ => None,
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => VarValue::String(s.clone()),
            Value::Number(n) => VarValue::Number(n.as_f64().unwrap_or(0.0)),
            Value::Bool(b) => VarValue::Bool(*b),
            Value::Null => VarValue::Null,
            Value::Array(items) => {
                VarValue::Sequence(items.iter().map(VarValue::from_json).collect())
            }
            Value::Object(map) => VarValue::Record(
                map.iter()
                    .map(|(k, v)| (k.clone(), VarValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            VarValue::String(s) => Value::String(s.clone()),
            VarValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            VarValue::Bool(b) => Value::Bool(*b),
            VarValue::Date(ts) => Value::Number((*ts).into()),
            VarValue::Null => Value::Null,
            VarValue::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            VarValue::Record(map) => {
                Value::Object(map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let s = format!("{n}");
        s
    }
}

/// Two keyed maps, scoped to one script execution (§3). Interior mutability
/// via `parking_lot::RwLock` so the store can be shared across the
/// recursive step-execution futures without threading `&mut` everywhere;
/// the Executor's single-threaded semantics (§5) mean there is never
/// contention in practice.
#[derive(Default)]
pub struct ValueStore {
    results: RwLock<HashMap<String, String>>,
    variables: RwLock<HashMap<String, VarValue>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed initial variables from the request body's `variables` object.
    pub fn seed(&self, initial: &Map<String, Value>) {
        let mut vars = self.variables.write();
        let mut results = self.results.write();
        for (k, v) in initial {
            let vv = VarValue::from_json(v);
            results.insert(k.clone(), vv.coerce_string());
            vars.insert(k.clone(), vv);
        }
    }

    pub fn get_result(&self, key: &str) -> Option<String> {
        self.results.read().get(key).cloned()
    }

    pub fn get_variable(&self, key: &str) -> Option<VarValue> {
        self.variables.read().get(key).cloned()
    }

    /// Look up `name` for interpolation: variables first, falling back to
    /// results (§4.2).
    pub fn lookup_string(&self, name: &str) -> Option<String> {
        if let Some(v) = self.variables.read().get(name) {
            return Some(v.coerce_string());
        }
        self.results.read().get(name).cloned()
    }

    /// Write a value to both maps (the common case): variables gets the
    /// typed value, results gets its canonical string coercion.
    pub fn set_both(&self, key: &str, value: VarValue) {
        let s = value.coerce_string();
        self.variables.write().insert(key.to_string(), value);
        self.results.write().insert(key.to_string(), s);
    }

    pub fn set_variable(&self, key: &str, value: VarValue) {
        self.variables.write().insert(key.to_string(), value);
    }

    pub fn set_result(&self, key: &str, value: impl Into<String>) {
        self.results.write().insert(key.to_string(), value.into());
    }

    /// Write a rect's sibling keys (§3): `K_x`, `K_y`, `K_width`,
    /// `K_height`, `K_centerX`, `K_centerY`.
    pub fn set_rect(&self, key: &str, rect: Rect) {
        self.set_both(&format!("{key}{SUFFIX_X}"), VarValue::Number(rect.x));
        self.set_both(
            &format!("{key}{}", crate::constants::SUFFIX_Y),
            VarValue::Number(rect.y),
        );
        self.set_both(
            &format!("{key}{SUFFIX_WIDTH}"),
            VarValue::Number(rect.width),
        );
        self.set_both(
            &format!("{key}{SUFFIX_HEIGHT}"),
            VarValue::Number(rect.height),
        );
        self.set_both(
            &format!("{key}{SUFFIX_CENTER_X}"),
            VarValue::Number(rect.center_x()),
        );
        self.set_both(
            &format!("{key}{SUFFIX_CENTER_Y}"),
            VarValue::Number(rect.center_y()),
        );
    }

    /// Write a parsed date's sibling keys (§4.4): timestamp plus
    /// year/month/day/hour/minute components.
    #[allow(clippy::too_many_arguments)]
    pub fn set_date(
        &self,
        key: &str,
        timestamp: i64,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) {
        self.set_both(key, VarValue::Date(timestamp));
        self.set_both(&format!("{key}{SUFFIX_TIMESTAMP}"), VarValue::Number(timestamp as f64));
        self.set_both(&format!("{key}{SUFFIX_YEAR}"), VarValue::Number(year as f64));
        self.set_both(&format!("{key}{SUFFIX_MONTH}"), VarValue::Number(month as f64));
        self.set_both(&format!("{key}{SUFFIX_DAY}"), VarValue::Number(day as f64));
        self.set_both(&format!("{key}{SUFFIX_HOUR}"), VarValue::Number(hour as f64));
        self.set_both(&format!("{key}{SUFFIX_MINUTE}"), VarValue::Number(minute as f64));
    }

    /// Write a collection's `K_count` sibling key alongside the sequence.
    pub fn set_collection(&self, key: &str, items: Vec<VarValue>) {
        let count = items.len();
        self.set_variable(key, VarValue::Sequence(items));
        self.set_both(&format!("{key}{SUFFIX_COUNT}"), VarValue::Number(count as f64));
    }

    /// Write a locate result's `K_found` sibling key.
    pub fn set_found(&self, key: &str, found: bool) {
        self.set_both(&format!("{key}{SUFFIX_FOUND}"), VarValue::Bool(found));
    }

    /// Write an element descriptor list as the named variable, spreading
    /// each record's fields under `item_<key>` style access used by
    /// `forEach` (caller supplies the already-suffixed name).
    pub fn set_elements(&self, key: &str, elements: &[ElementDescriptor]) {
        let items = elements
            .iter()
            .map(|e| {
                let mut rec = HashMap::new();
                rec.insert("index".into(), VarValue::Number(e.index as f64));
                rec.insert("x".into(), VarValue::Number(e.x));
                rec.insert("y".into(), VarValue::Number(e.y));
                rec.insert("width".into(), VarValue::Number(e.width));
                rec.insert("height".into(), VarValue::Number(e.height));
                rec.insert("centerX".into(), VarValue::Number(e.center_x));
                rec.insert("centerY".into(), VarValue::Number(e.center_y));
                rec.insert(
                    "label".into(),
                    e.label
                        .clone()
                        .map(VarValue::String)
                        .unwrap_or(VarValue::Null),
                );
                rec.insert(
                    "value".into(),
                    e.value
                        .clone()
                        .map(VarValue::String)
                        .unwrap_or(VarValue::Null),
                );
                rec.insert(
                    "identifier".into(),
                    e.identifier
                        .clone()
                        .map(VarValue::String)
                        .unwrap_or(VarValue::Null),
                );
                rec.insert("isEnabled".into(), VarValue::Bool(e.is_enabled));
                rec.insert("isHittable".into(), VarValue::Bool(e.is_hittable));
                VarValue::Record(rec)
            })
            .collect();
        self.set_collection(key, items);
    }

    /// Snapshot both maps as JSON objects for the Terminal Result (§3).
    pub fn snapshot(&self) -> (Map<String, Value>, Map<String, Value>) {
        let results = self
            .results
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let variables = self
            .variables
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        (results, variables)
    }
}

#[cfg(test)]
mod value_test;

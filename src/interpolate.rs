//! The Interpolator (C5): substitutes `${name}` references inside strings
//! and recursively inside step argument trees.
//!
//! Interpolation happens once per step at dispatch entry (§4.2), producing
//! an immutable resolved argument tree that handlers see.

use crate::value::ValueStore;
use serde_json::{Map, Value};

/// Interpolates every `${name}` occurrence in `input`, scanning left to
/// right. Each match is replaced by the value store lookup (variables
/// falling back to results), coerced to string; a missing name substitutes
/// the empty string.
pub fn interpolate_str(input: &str, store: &ValueStore) -> String {
    let mut out = String::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' && i + 1 < bytes.len() && bytes[i + 1] == b'{' {
            if let Some(end) = input[i + 2..].find('}') {
                let name = &input[i + 2..i + 2 + end];
                let value = store.lookup_string(name).unwrap_or_default();
                out.push_str(&value);
                i += 2 + end + 1;
                continue;
            }
        }
        // Push the current UTF-8 scalar, not just the byte, to stay
        // boundary-safe on multi-byte input.
        let ch = input[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// Walks a JSON value tree: strings interpolate, arrays and objects
/// recurse, other scalars pass through unchanged (§4.2).
pub fn interpolate_value(value: &Value, store: &ValueStore) -> Value {
    match value {
        Value::String(s) => Value::String(interpolate_str(s, store)),
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| interpolate_value(v, store)).collect())
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), interpolate_value(v, store)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Walks an argument map (a step's flattened `args`), interpolating every
/// value.
pub fn interpolate_map(args: &Map<String, Value>, store: &ValueStore) -> Map<String, Value> {
    args.iter()
        .map(|(k, v)| (k.clone(), interpolate_value(v, store)))
        .collect()
}

#[cfg(test)]
mod interpolate_test;

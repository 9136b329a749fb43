//! Variables and math: `set`, `getVar`, `increment`, `decrement`,
//! `concat`, `math` (§4.4).

use super::{as_key, ExecutionContext};
use crate::error::{InterpError, Result};
use crate::model::Step;
use crate::value::VarValue;

/// `set{key, value, target∈{variables,results}="variables"}`.
pub async fn set(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let key = step
        .arg_str("key")
        .ok_or_else(|| InterpError::invalid_argument("'key' is required"))?;
    let value = step
        .arg("value")
        .ok_or_else(|| InterpError::invalid_argument("'value' is required"))?;
    let target = step.arg_str("target").unwrap_or("variables");
    let vv = VarValue::from_json(value);
    match target {
        "results" => ctx.store.set_result(key, vv.coerce_string()),
        "variables" => ctx.store.set_both(key, vv),
        other => return Err(InterpError::invalid_argument(format!("unknown target: {other}"))),
    }
    Ok(())
}

/// `getVar{key, as}` — copies a variable into the `as` key, both maps.
pub async fn get_var(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let key = step
        .arg_str("key")
        .ok_or_else(|| InterpError::invalid_argument("'key' is required"))?;
    let value = ctx.store.get_variable(key).unwrap_or(VarValue::Null);
    if let Some(dest) = as_key(step) {
        ctx.store.set_both(dest, value);
    }
    Ok(())
}

fn numeric(ctx: &ExecutionContext, key: &str) -> f64 {
    ctx.store.get_variable(key).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// `increment{key, by=1}`.
pub async fn increment(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let key = step
        .arg_str("key")
        .ok_or_else(|| InterpError::invalid_argument("'key' is required"))?;
    let by = step.arg_f64("by").unwrap_or(1.0);
    ctx.store.set_both(key, VarValue::Number(numeric(ctx, key) + by));
    Ok(())
}

/// `decrement{key, by=1}`.
pub async fn decrement(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let key = step
        .arg_str("key")
        .ok_or_else(|| InterpError::invalid_argument("'key' is required"))?;
    let by = step.arg_f64("by").unwrap_or(1.0);
    ctx.store.set_both(key, VarValue::Number(numeric(ctx, key) - by));
    Ok(())
}

/// `concat{values[], separator="", as}` — each value is already
/// interpolated by dispatch entry; concatenation coerces each to its
/// canonical string form.
pub async fn concat(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let values = step
        .arg("values")
        .and_then(|v| v.as_array())
        .ok_or_else(|| InterpError::invalid_argument("'values' array is required"))?;
    let separator = step.arg_str("separator").unwrap_or("");
    let joined = values
        .iter()
        .map(|v| VarValue::from_json(v).coerce_string())
        .collect::<Vec<_>>()
        .join(separator);
    if let Some(key) = as_key(step) {
        ctx.store.set_both(key, VarValue::String(joined));
    }
    Ok(())
}

fn operand(ctx: &ExecutionContext, step: &Step, literal_key: &str, var_key: &str) -> Result<f64> {
    if let Some(v) = step.arg_f64(literal_key) {
        return Ok(v);
    }
    if let Some(name) = step.arg_str(var_key) {
        return Ok(numeric(ctx, name));
    }
    Err(InterpError::invalid_argument(format!(
        "'{literal_key}' or '{var_key}' is required"
    )))
}

const UNARY_OPS: &[&str] = &["round", "floor", "ceil", "abs"];

/// `math{operation, a|aVar, b|bVar, as}` — divide-by-zero is an error;
/// unary operations ignore `b` (§4.4).
pub async fn math(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let operation = step
        .arg_str("operation")
        .ok_or_else(|| InterpError::invalid_argument("'operation' is required"))?;
    let a = operand(ctx, step, "a", "aVar")?;

    let result = if UNARY_OPS.contains(&operation) {
        match operation {
            "round" => a.round(),
            "floor" => a.floor(),
            "ceil" => a.ceil(),
            "abs" => a.abs(),
            _ => unreachable!(),
        }
    } else {
        let b = operand(ctx, step, "b", "bVar")?;
        match operation {
            "add" => a + b,
            "subtract" => a - b,
            "multiply" => a * b,
            "divide" => {
                if b == 0.0 {
                    return Err(InterpError::divide_by_zero("division by zero in math step"));
                }
                a / b
            }
            "mod" => {
                if b == 0.0 {
                    return Err(InterpError::divide_by_zero("modulo by zero in math step"));
                }
                a % b
            }
            "min" => a.min(b),
            "max" => a.max(b),
            other => return Err(InterpError::invalid_argument(format!("unknown operation: {other}"))),
        }
    };

    if let Some(key) = as_key(step) {
        ctx.store.set_both(key, VarValue::Number(result));
    }
    Ok(())
}

#[cfg(test)]
mod variables_test;

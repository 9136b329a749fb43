//! The Control-Flow Engine (C8): `if`, `while`, `repeat`, `forEach`,
//! `try`/`catch`/`finally`, `break`, `stop`, `return`, and the closed
//! `Condition` set they evaluate (§4.5).

use super::context::ExecutionContext;
use super::interpreter::{execute_steps, StepFailure};
use crate::constants::{
    DEFAULT_INDEX_VAR, DEFAULT_ITEM_VAR, DEFAULT_MAX_LOOP_ITERATIONS, DEFAULT_WHILE_INTERVAL_SECS,
    VAR_ERROR, VAR_INDEX, VAR_ITERATION, VAR_RETURN_VALUE,
};
use crate::driver::SelectorKind;
use crate::error::{InterpError, Result};
use crate::model::Step;
use crate::selector;
use crate::value::VarValue;
use std::time::{Duration, Instant};

/// The closed set of named predicates evaluable by `if`/`while`/`assert`
/// (§4.5).
pub enum Condition {
    Exists { selector: String, selector_type: String },
    NotExists { selector: String, selector_type: String },
    Visible { selector: String, selector_type: String },
    WaitExists { selector: String, selector_type: String, timeout_secs: f64 },
    TextVisible { text: String, timeout_secs: f64 },
    TextNotVisible { text: String, timeout_secs: f64 },
    Equals { key: String, value: String },
    NotEquals { key: String, value: String },
    Contains { key: String, value: String },
    GreaterThan { key: String, value: f64 },
    LessThan { key: String, value: f64 },
    True { key: String },
    False { key: String },
}

impl Condition {
    /// Parse a resolved step's `condition` + supporting args.
    pub fn parse(step: &Step) -> Result<Self> {
        let name = step
            .arg_str("condition")
            .ok_or_else(|| InterpError::invalid_argument("'condition' is required"))?;
        let selector = || step.arg_str("selector").unwrap_or_default().to_string();
        let selector_type = || step.arg_str("selectorType").unwrap_or("accessibilityId").to_string();
        let key = || step.arg_str("key").unwrap_or_default().to_string();
        let timeout_secs = || step.arg_f64("timeout").unwrap_or(0.0);

        Ok(match name {
            "exists" => Condition::Exists { selector: selector(), selector_type: selector_type() },
            "notExists" => {
                Condition::NotExists { selector: selector(), selector_type: selector_type() }
            }
            "visible" => Condition::Visible { selector: selector(), selector_type: selector_type() },
            "waitExists" => Condition::WaitExists {
                selector: selector(),
                selector_type: selector_type(),
                timeout_secs: timeout_secs(),
            },
            "textVisible" => Condition::TextVisible {
                text: step.arg_str("text").unwrap_or_default().to_string(),
                timeout_secs: timeout_secs(),
            },
            "textNotVisible" => Condition::TextNotVisible {
                text: step.arg_str("text").unwrap_or_default().to_string(),
                timeout_secs: timeout_secs(),
            },
            "equals" => Condition::Equals {
                key: key(),
                value: step.arg_str("value").unwrap_or_default().to_string(),
            },
            "notEquals" => Condition::NotEquals {
                key: key(),
                value: step.arg_str("value").unwrap_or_default().to_string(),
            },
            "contains" => Condition::Contains {
                key: key(),
                value: step.arg_str("value").unwrap_or_default().to_string(),
            },
            "greaterThan" => Condition::GreaterThan {
                key: key(),
                value: step.arg_f64("value").unwrap_or(0.0),
            },
            "lessThan" => {
                Condition::LessThan { key: key(), value: step.arg_f64("value").unwrap_or(0.0) }
            }
            "true" => Condition::True { key: key() },
            "false" => Condition::False { key: key() },
            other => {
                return Err(InterpError::invalid_argument(format!("unknown condition: {other}")));
            }
        })
    }
}

/// Evaluate a condition against current state and (for UI/OCR kinds) the
/// live screen.
pub async fn evaluate(ctx: &ExecutionContext, condition: &Condition) -> Result<bool> {
    match condition {
        Condition::Exists { selector: sel, selector_type } => {
            let app = ctx.driver.active_app().await?;
            let kind = SelectorKind::parse(selector_type);
            Ok(selector::find_one(&*app, kind, sel).await?.is_some())
        }
        Condition::NotExists { selector: sel, selector_type } => {
            let app = ctx.driver.active_app().await?;
            let kind = SelectorKind::parse(selector_type);
            Ok(selector::find_one(&*app, kind, sel).await?.is_none())
        }
        Condition::Visible { selector: sel, selector_type } => {
            let app = ctx.driver.active_app().await?;
            let kind = SelectorKind::parse(selector_type);
            match selector::find_one(&*app, kind, sel).await? {
                Some(el) => Ok(el.is_hittable().await?),
                None => Ok(false),
            }
        }
        Condition::WaitExists { selector: sel, selector_type, timeout_secs } => {
            let deadline = Instant::now() + Duration::from_secs_f64(*timeout_secs);
            let kind = SelectorKind::parse(selector_type);
            loop {
                let app = ctx.driver.active_app().await?;
                if selector::find_one(&*app, kind, sel).await?.is_some() {
                    return Ok(true);
                }
                if Instant::now() >= deadline {
                    return Ok(false);
                }
                tokio::time::sleep(crate::constants::POLL_INTERVAL).await;
            }
        }
        Condition::TextVisible { text, timeout_secs } => {
            wait_text_condition(ctx, text, *timeout_secs, true).await
        }
        Condition::TextNotVisible { text, timeout_secs } => {
            wait_text_condition(ctx, text, *timeout_secs, false).await
        }
        Condition::Equals { key, value } => {
            Ok(ctx.store.get_result(key).as_deref() == Some(value.as_str()))
        }
        Condition::NotEquals { key, value } => {
            Ok(ctx.store.get_result(key).as_deref() != Some(value.as_str()))
        }
        Condition::Contains { key, value } => {
            Ok(ctx.store.get_result(key).is_some_and(|v| v.contains(value.as_str())))
        }
        Condition::GreaterThan { key, value } => {
            let current = ctx.store.get_variable(key).and_then(|v| v.as_f64()).unwrap_or(0.0);
            Ok(current > *value)
        }
        Condition::LessThan { key, value } => {
            let current = ctx.store.get_variable(key).and_then(|v| v.as_f64()).unwrap_or(0.0);
            Ok(current < *value)
        }
        Condition::True { key } => {
            Ok(ctx.store.get_variable(key).map(|v| v.truthy()).unwrap_or(false))
        }
        Condition::False { key } => {
            Ok(!ctx.store.get_variable(key).map(|v| v.truthy()).unwrap_or(false))
        }
    }
}

async fn wait_text_condition(
    ctx: &ExecutionContext,
    text: &str,
    timeout_secs: f64,
    want_visible: bool,
) -> Result<bool> {
    let deadline = Instant::now() + Duration::from_secs_f64(timeout_secs);
    loop {
        let frame = ctx.driver.capture_screenshot().await?;
        let found = ctx.vision.find_text(&frame, text).await?.is_some();
        if found == want_visible {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(crate::constants::VISION_POLL_INTERVAL).await;
    }
}

/// `if {condition, then[], else[]}` (§4.5).
pub async fn exec_if(ctx: &ExecutionContext, step: &Step) -> std::result::Result<(), StepFailure> {
    let condition = Condition::parse(step).map_err(|e| failure("if", step, e))?;
    let matched = evaluate(ctx, &condition).await.map_err(|e| failure("if", step, e))?;
    let branch = if matched { step.then.as_deref() } else { step.else_.as_deref() };
    if let Some(sub_steps) = branch {
        execute_steps(ctx, sub_steps).await?;
    }
    Ok(())
}

/// `while {condition, do[], maxIterations=100, interval=0.1}` (§4.5).
pub async fn exec_while(
    ctx: &ExecutionContext,
    step: &Step,
) -> std::result::Result<(), StepFailure> {
    let condition = Condition::parse(step).map_err(|e| failure("while", step, e))?;
    let max_iterations =
        step.arg_u64("maxIterations").unwrap_or(DEFAULT_MAX_LOOP_ITERATIONS as u64) as u32;
    let interval = step.arg_f64("interval").unwrap_or(DEFAULT_WHILE_INTERVAL_SECS);
    let body = step.do_.as_deref().unwrap_or(&[]);

    for i in 0..max_iterations {
        if ctx.signals.is_stop_set() {
            break;
        }
        let matched = evaluate(ctx, &condition).await.map_err(|e| failure("while", step, e))?;
        if !matched {
            break;
        }
        ctx.store.set_both(VAR_ITERATION, VarValue::Number(i as f64));
        execute_steps(ctx, body).await?;
        if ctx.signals.take_break() {
            break;
        }
        tokio::time::sleep(Duration::from_secs_f64(interval)).await;
    }
    Ok(())
}

/// `repeat {times, do[]}` (§4.5).
pub async fn exec_repeat(
    ctx: &ExecutionContext,
    step: &Step,
) -> std::result::Result<(), StepFailure> {
    let times = step.arg_u64("times").unwrap_or(0);
    let body = step.do_.as_deref().unwrap_or(&[]);
    for i in 0..times {
        if ctx.signals.is_stop_set() {
            break;
        }
        ctx.store.set_both(VAR_ITERATION, VarValue::Number(i as f64));
        ctx.store.set_both(VAR_INDEX, VarValue::Number(i as f64));
        execute_steps(ctx, body).await?;
        if ctx.signals.take_break() {
            break;
        }
    }
    Ok(())
}

/// `forEach {items|elements, as|itemVar, indexAs|indexVar, limit?, do[]}`
/// (§4.4/§4.5).
pub async fn exec_for_each(
    ctx: &ExecutionContext,
    step: &Step,
) -> std::result::Result<(), StepFailure> {
    let source_key = step
        .arg_str("items")
        .or_else(|| step.arg_str("elements"))
        .unwrap_or(crate::constants::DEFAULT_ELEMENTS_KEY);
    let item_var = step
        .arg_str("as")
        .or_else(|| step.arg_str("itemVar"))
        .unwrap_or(DEFAULT_ITEM_VAR)
        .to_string();
    let index_var = step
        .arg_str("indexAs")
        .or_else(|| step.arg_str("indexVar"))
        .unwrap_or(DEFAULT_INDEX_VAR)
        .to_string();
    let limit = step.arg_u64("limit").map(|l| l as usize);
    let body = step.do_.as_deref().unwrap_or(&[]);

    let items = match ctx.store.get_variable(source_key) {
        Some(VarValue::Sequence(items)) => items,
        _ => Vec::new(),
    };
    let iter_count = limit.map(|l| l.min(items.len())).unwrap_or(items.len());

    for (i, item) in items.into_iter().take(iter_count).enumerate() {
        if ctx.signals.is_stop_set() {
            break;
        }
        spread_item_fields(ctx, &item_var, &item);
        ctx.store.set_both(&index_var, VarValue::Number(i as f64));
        ctx.store.set_both(VAR_INDEX, VarValue::Number(i as f64));
        execute_steps(ctx, body).await?;
        if ctx.signals.take_break() {
            break;
        }
    }
    Ok(())
}

fn spread_item_fields(ctx: &ExecutionContext, item_var: &str, item: &VarValue) {
    ctx.store.set_variable(item_var, item.clone());
    if let VarValue::Record(fields) = item {
        for (k, v) in fields {
            ctx.store.set_both(&format!("{item_var}_{k}"), v.clone());
        }
    }
}

/// `try {try[]|do[], catch[]?, finally[]?, propagateError?=false}` (§4.5).
pub async fn exec_try(ctx: &ExecutionContext, step: &Step) -> std::result::Result<(), StepFailure> {
    let try_body = step.try_.as_deref().or(step.do_.as_deref()).unwrap_or(&[]);
    let propagate_error = step.arg_bool("propagateError").unwrap_or(false);

    let outcome = execute_steps(ctx, try_body).await;

    if let Err(failure) = &outcome {
        ctx.store.set_both(VAR_ERROR, VarValue::String(failure.error.message()));
        if let Some(catch_body) = &step.catch {
            // Errors inside `catch` itself are swallowed (§4.5).
            let _ = execute_steps(ctx, catch_body).await;
        }
    }

    if let Some(finally_body) = &step.finally {
        // Errors inside `finally` are swallowed too.
        let _ = execute_steps(ctx, finally_body).await;
    }

    if propagate_error {
        outcome
    } else {
        Ok(())
    }
}

/// `return {value?}` — writes `_returnValue` and sets the break signal
/// (§4.5).
pub fn exec_return(ctx: &ExecutionContext, step: &Step) {
    if let Some(value) = step.arg("value") {
        ctx.store.set_both(VAR_RETURN_VALUE, VarValue::from_json(value));
    }
    ctx.signals.set_break();
}

fn failure(action: &str, step: &Step, error: InterpError) -> StepFailure {
    StepFailure { error, failed_action: action.to_string(), failed_step_id: step.id.clone() }
}

#[cfg(test)]
mod control_flow_test;

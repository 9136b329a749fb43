//! Assertions: `assert`, `assertExists`, `assertNotExists`, `assertText`
//! (§4.4). All failures surface as `AssertionFailed`.

use super::{resolve_element, ExecutionContext};
use crate::engine::control_flow::{evaluate, Condition};
use crate::error::{InterpError, Result};
use crate::model::Step;

fn failure_message(step: &Step, default: impl Into<String>) -> String {
    step.arg_str("message").map(str::to_string).unwrap_or_else(|| default.into())
}

/// `assert{condition, …, message?}` — evaluates any closed `Condition`
/// and fails with `AssertionFailed` when it doesn't hold.
pub async fn assert(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let condition = Condition::parse(step)?;
    if evaluate(ctx, &condition).await? {
        Ok(())
    } else {
        Err(InterpError::assertion_failed(failure_message(step, "condition was not met")))
    }
}

/// `assertExists{selector, selectorType, message?}`.
pub async fn assert_exists(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    if resolve_element(ctx, step).await?.is_some() {
        Ok(())
    } else {
        Err(InterpError::assertion_failed(failure_message(step, "element does not exist")))
    }
}

/// `assertNotExists{selector, selectorType, message?}`.
pub async fn assert_not_exists(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    if resolve_element(ctx, step).await?.is_none() {
        Ok(())
    } else {
        Err(InterpError::assertion_failed(failure_message(step, "element exists")))
    }
}

/// `assertText{selector, selectorType, expected?|contains?, message?}`.
pub async fn assert_text(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let el = resolve_element(ctx, step)
        .await?
        .ok_or_else(|| InterpError::assertion_failed(failure_message(step, "element does not exist")))?;
    let label = el.label().await?.unwrap_or_default();

    if let Some(expected) = step.arg_str("expected") {
        if label != expected {
            return Err(InterpError::assertion_failed(failure_message(
                step,
                format!("expected text '{expected}', got '{label}'"),
            )));
        }
        return Ok(());
    }
    if let Some(contains) = step.arg_str("contains") {
        if !label.contains(contains) {
            return Err(InterpError::assertion_failed(failure_message(
                step,
                format!("expected text to contain '{contains}', got '{label}'"),
            )));
        }
        return Ok(());
    }
    Err(InterpError::invalid_argument("'expected' or 'contains' is required"))
}

#[cfg(test)]
mod assertions_test;

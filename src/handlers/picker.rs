//! Picker wheel actions: `setPicker`, `getPicker` (§4.4).

use super::{step_timeout, wait_for_element, ExecutionContext};
use crate::error::{InterpError, Result};
use crate::model::Step;
use crate::value::VarValue;

/// `setPicker{selector, selectorType, value, timeout}`.
pub async fn set_picker(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let value = step
        .arg_str("value")
        .ok_or_else(|| InterpError::invalid_argument("'value' is required"))?;
    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("picker not found"))?;
    el.adjust_picker_to(value).await
}

/// `getPicker{selector, selectorType, as}`.
pub async fn get_picker(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("picker not found"))?;
    let value = el.picker_value().await?;
    if let Some(key) = super::as_key(step) {
        ctx.store.set_both(key, value.map(VarValue::String).unwrap_or(VarValue::Null));
    }
    Ok(())
}

#[cfg(test)]
mod picker_test;

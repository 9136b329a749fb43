//! Text input: `type`, `pasteText` (§4.4).

use super::{step_timeout, wait_for_element, ExecutionContext};
use crate::error::{InterpError, Result};
use crate::model::Step;

fn text_arg(step: &Step) -> Result<&str> {
    step.arg_str("value")
        .or_else(|| step.arg_str("text"))
        .ok_or_else(|| InterpError::invalid_argument("'value' (or 'text') is required"))
}

/// `type{value|text, selector?, selectorType?, clear?=false, timeout}` —
/// when `selector` is given, taps it first, optionally clears, then types
/// (§4.4).
pub async fn type_text(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let text = text_arg(step)?;
    let clear = step.arg_bool("clear").unwrap_or(false);
    let timeout = step_timeout(step, 10.0);

    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element not found"))?;
    if !el.is_hittable().await? {
        return Err(InterpError::not_interactable("element is not hittable"));
    }
    el.tap().await?;
    if clear {
        el.clear_text().await?;
    }
    el.type_text(text).await
}

/// `pasteText{text, selector?, selectorType?, timeout}` — sets the device
/// pasteboard then taps the resolved element and pastes into it (§4.4).
pub async fn paste_text(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let text = text_arg(step)?;
    let timeout = step_timeout(step, 10.0);
    ctx.driver.set_pasteboard(text).await?;

    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element not found"))?;
    el.tap().await?;
    el.paste_text().await
}

#[cfg(test)]
mod input_test;

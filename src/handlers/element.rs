//! Single- and multi-element actions (§4.4).

use super::{resolve_element, selector_args, step_timeout, wait_for_element, ExecutionContext};
use crate::constants::DEFAULT_ELEMENTS_KEY;
use crate::error::{InterpError, Result};
use crate::model::{ElementDescriptor, Rect, Step};
use crate::selector;
use crate::value::VarValue;
use std::time::Instant;

/// `click`/`tap{selector, selectorType, timeout}` — requires the element
/// be hittable (§4.4).
pub async fn click(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element not found"))?;
    if !el.is_hittable().await? {
        return Err(InterpError::not_interactable("element is not hittable"));
    }
    el.tap().await
}

/// `wait{selector, selectorType, timeout}` — only requires exists (§4.4).
pub async fn wait(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element did not appear"))?;
    Ok(())
}

/// `waitDisappear{selector, selectorType, timeout}` — succeeds even on
/// timeout; observation only (§4.4).
pub async fn wait_disappear(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let deadline = Instant::now() + timeout;
    loop {
        if resolve_element(ctx, step).await?.is_none() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Ok(());
        }
        tokio::time::sleep(crate::constants::POLL_INTERVAL).await;
    }
}

/// `read{selector, selectorType, attribute, as}` (§4.4).
pub async fn read(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element not found"))?;
    let attribute = step.arg_str("attribute").unwrap_or("label");
    let value = match attribute {
        "label" => el.label().await?,
        "value" => el.value().await?,
        "identifier" => el.identifier().await?,
        "placeholderValue" => el.placeholder_value().await?,
        other => return Err(InterpError::invalid_argument(format!("unknown attribute: {other}"))),
    };
    if let Some(key) = super::as_key(step) {
        ctx.store.set_both(
            key,
            value.map(VarValue::String).unwrap_or(VarValue::Null),
        );
    }
    Ok(())
}

/// `exists{selector, selectorType, as, timeout=0}` (§4.4).
pub async fn exists(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 0.0);
    let found = wait_for_element(ctx, step, timeout).await?.is_some();
    if let Some(key) = super::as_key(step) {
        ctx.store.set_both(key, VarValue::Bool(found));
    }
    Ok(())
}

/// `getRect{selector, selectorType, as}` — writes sibling keys (§3, §4.4).
pub async fn get_rect(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element not found"))?;
    let rect = el.frame().await?;
    if let Some(key) = super::as_key(step) {
        ctx.store.set_rect(key, rect);
    }
    Ok(())
}

/// `clear{selector, selectorType, timeout}` — requires the element be
/// hittable (§4.4).
pub async fn clear(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element not found"))?;
    if !el.is_hittable().await? {
        return Err(InterpError::not_interactable("element is not hittable"));
    }
    el.clear_text().await
}

async fn rect_descriptor(
    index: usize,
    el: &dyn crate::driver::ElementHandle,
) -> Result<ElementDescriptor> {
    let rect: Rect = el.frame().await?;
    Ok(ElementDescriptor {
        index,
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        center_x: rect.center_x(),
        center_y: rect.center_y(),
        label: el.label().await?,
        value: el.value().await?,
        identifier: el.identifier().await?,
        is_enabled: el.is_enabled().await?,
        is_hittable: el.is_hittable().await?,
    })
}

/// `findElements{selector, selectorType, limit?, as="elements"}` refreshes
/// the Element Cache and writes the ordered descriptor list plus
/// `{as}_count` (§3, §4.4).
pub async fn find_elements(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let (selector, kind) = selector_args(step)?;
    let limit = step.arg_u64("limit").unwrap_or(0) as usize;
    let app = ctx.driver.active_app().await?;
    let elements = selector::find_many(&*app, kind, selector, limit).await?;

    let mut descriptors = Vec::with_capacity(elements.len());
    for (i, el) in elements.iter().enumerate() {
        descriptors.push(rect_descriptor(i, el.as_ref()).await?);
    }

    let key = step.as_.as_deref().unwrap_or(DEFAULT_ELEMENTS_KEY);
    *ctx.element_cache.write() = descriptors.clone();
    ctx.store.set_elements(key, &descriptors);
    Ok(())
}

/// `countElements{selector, selectorType, as}` (§4.4).
pub async fn count_elements(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let (selector, kind) = selector_args(step)?;
    let app = ctx.driver.active_app().await?;
    let elements = crate::selector::find_many(&*app, kind, selector, 0).await?;
    if let Some(key) = super::as_key(step) {
        ctx.store.set_both(key, VarValue::Number(elements.len() as f64));
    }
    Ok(())
}

/// `clickNth{index}` — taps the nth element from the last `findElements`
/// Element Cache (§4.4).
pub async fn click_nth(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let index = step
        .arg_u64("index")
        .ok_or_else(|| InterpError::invalid_argument("'index' is required"))? as usize;
    let descriptor = {
        let cache = ctx.element_cache.read();
        cache
            .get(index)
            .cloned()
            .ok_or_else(|| InterpError::not_found(format!("no cached element at index {index}")))?
    };
    ctx.driver.tap_xy(descriptor.center_x, descriptor.center_y).await
}

/// `readNth{index, attribute, as}` — reads from the Element Cache
/// descriptor directly (§4.4).
pub async fn read_nth(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let index = step
        .arg_u64("index")
        .ok_or_else(|| InterpError::invalid_argument("'index' is required"))? as usize;
    let attribute = step.arg_str("attribute").unwrap_or("label");
    let descriptor = {
        let cache = ctx.element_cache.read();
        cache
            .get(index)
            .cloned()
            .ok_or_else(|| InterpError::not_found(format!("no cached element at index {index}")))?
    };
    let value = match attribute {
        "label" => descriptor.label,
        "value" => descriptor.value,
        "identifier" => descriptor.identifier,
        other => return Err(InterpError::invalid_argument(format!("unknown attribute: {other}"))),
    };
    if let Some(key) = super::as_key(step) {
        ctx.store.set_both(key, value.map(VarValue::String).unwrap_or(VarValue::Null));
    }
    Ok(())
}

#[cfg(test)]
mod element_test;

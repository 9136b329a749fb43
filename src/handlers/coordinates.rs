//! Coordinate- and gesture-based actions: `tapXY`, `doubleTapXY`,
//! `longPressXY`, `swipe`, `swipeElement`, `scroll`, `pinch` (§4.2, §4.4).

use super::{step_timeout, wait_for_element, ExecutionContext};
use crate::constants::{
    DEFAULT_LONG_PRESS_DURATION_SECS, DEFAULT_PINCH_SCALE, DEFAULT_PINCH_VELOCITY,
    DEFAULT_SCROLL_DISTANCE, DEFAULT_SWIPE_DURATION_SECS,
};
use crate::driver::SwipeDirection;
use crate::error::{InterpError, Result};
use crate::model::Step;

/// Resolve an x/y coordinate pair, accepting either a literal number or a
/// `xVar`/`yVar` lookup against the Value Store (§4.4).
fn coord(ctx: &ExecutionContext, step: &Step, key: &str, var_key: &str) -> Result<f64> {
    if let Some(v) = step.arg_f64(key) {
        return Ok(v);
    }
    if let Some(name) = step.arg_str(var_key) {
        if let Some(v) = ctx.store.get_variable(name).and_then(|v| v.as_f64()) {
            return Ok(v);
        }
    }
    Err(InterpError::invalid_argument(format!(
        "'{key}' or '{var_key}' is required"
    )))
}

fn direction(step: &Step) -> Result<SwipeDirection> {
    let raw = step
        .arg_str("direction")
        .ok_or_else(|| InterpError::invalid_argument("'direction' is required"))?;
    SwipeDirection::parse(raw).ok_or_else(|| InterpError::invalid_argument(format!("unknown direction: {raw}")))
}

/// Hardcoded fallback screen dimensions, used whenever a gesture has no
/// element to derive a center point from.
const SCREEN_W: f64 = 400.0;
const SCREEN_H: f64 = 800.0;

fn direction_vector(dir: SwipeDirection, distance: f64) -> (f64, f64) {
    match dir {
        SwipeDirection::Up => (0.0, -distance),
        SwipeDirection::Down => (0.0, distance),
        SwipeDirection::Left => (-distance, 0.0),
        SwipeDirection::Right => (distance, 0.0),
    }
}

/// `tapXY{x|xVar, y|yVar}`.
pub async fn tap_xy(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let x = coord(ctx, step, "x", "xVar")?;
    let y = coord(ctx, step, "y", "yVar")?;
    ctx.driver.tap_xy(x, y).await
}

/// `doubleTapXY{x|xVar, y|yVar}`.
pub async fn double_tap_xy(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let x = coord(ctx, step, "x", "xVar")?;
    let y = coord(ctx, step, "y", "yVar")?;
    ctx.driver.double_tap_xy(x, y).await
}

/// `longPressXY{x|xVar, y|yVar, duration=1.0}`.
pub async fn long_press_xy(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let x = coord(ctx, step, "x", "xVar")?;
    let y = coord(ctx, step, "y", "yVar")?;
    let duration = step.arg_f64("duration").unwrap_or(DEFAULT_LONG_PRESS_DURATION_SECS);
    ctx.driver.press_xy(x, y, duration).await
}

/// `swipe{x|xVar, y|yVar, toX|toXVar, toY|toYVar, duration=0.3}` — a raw
/// coordinate-to-coordinate drag gesture.
pub async fn swipe(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let duration = step.arg_f64("duration").unwrap_or(DEFAULT_SWIPE_DURATION_SECS);
    let x = coord(ctx, step, "x", "xVar")?;
    let y = coord(ctx, step, "y", "yVar")?;
    let to_x = coord(ctx, step, "toX", "toXVar")?;
    let to_y = coord(ctx, step, "toY", "toYVar")?;
    ctx.driver.press_then_drag_to(x, y, to_x, to_y, duration).await
}

/// `swipeElement{selector, selectorType, direction, timeout}` — swipes
/// within the element's own frame.
pub async fn swipe_element(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let dir = direction(step)?;
    let el = wait_for_element(ctx, step, timeout)
        .await?
        .ok_or_else(|| InterpError::not_found("element not found"))?;
    el.swipe(dir).await
}

/// `scroll{direction, distance=200, selector?, selectorType?, timeout}` —
/// scrolls within `selector`'s frame if given, else press-then-drags
/// through the screen center.
pub async fn scroll(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let dir = direction(step)?;
    let distance = step.arg_f64("distance").unwrap_or(DEFAULT_SCROLL_DISTANCE);

    if step.arg_str("selector").is_some() {
        let el = wait_for_element(ctx, step, timeout)
            .await?
            .ok_or_else(|| InterpError::not_found("element not found"))?;
        return el.scroll(dir, distance).await;
    }

    let (vx, vy) = direction_vector(dir, distance);
    let (cx, cy) = (SCREEN_W / 2.0, SCREEN_H / 2.0);
    ctx.driver
        .press_then_drag_to(cx - vx / 2.0, cy - vy / 2.0, cx + vx / 2.0, cy + vy / 2.0, DEFAULT_SWIPE_DURATION_SECS)
        .await
}

/// `pinch{selector?, selectorType?, scale=1.0, velocity=1.0, timeout}` —
/// pinches within `selector`'s frame if given, else centered on screen.
pub async fn pinch(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, 10.0);
    let scale = step.arg_f64("scale").unwrap_or(DEFAULT_PINCH_SCALE);
    let velocity = step.arg_f64("velocity").unwrap_or(DEFAULT_PINCH_VELOCITY);

    if step.arg_str("selector").is_some() {
        let el = wait_for_element(ctx, step, timeout)
            .await?
            .ok_or_else(|| InterpError::not_found("element not found"))?;
        return el.pinch(scale, velocity).await;
    }

    ctx.driver.pinch_xy(SCREEN_W / 2.0, SCREEN_H / 2.0, scale, velocity).await
}

#[cfg(test)]
mod coordinates_test;

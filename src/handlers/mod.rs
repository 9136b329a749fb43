//! Primitive Handlers (C7): ~50 leaf actions grouped by concern. Every
//! handler shares the signature `async fn(ctx, step) -> Result<()>`; the
//! step has already been interpolated by the dispatcher (§4.3, §4.4).

pub mod alerts;
pub mod app;
pub mod assertions;
pub mod coordinates;
pub mod dates;
pub mod element;
pub mod input;
pub mod picker;
pub mod utility;
pub mod variables;
pub mod vision_handlers;

use crate::engine::context::ExecutionContext;
use crate::error::{InterpError, Result};
use crate::model::Step;
use std::time::{Duration, Instant};

/// Per-step timeout, defaulting to the spec's 10s unless the handler
/// documents its own default (§4.4).
pub fn step_timeout(step: &Step, default_secs: f64) -> Duration {
    Duration::from_secs_f64(step.arg_f64("timeout").unwrap_or(default_secs))
}

/// The selector + selectorType pair shared by every single/multi-element
/// action (§4.4).
pub fn selector_args(step: &Step) -> Result<(&str, crate::driver::SelectorKind)> {
    let selector = step
        .arg_str("selector")
        .ok_or_else(|| InterpError::invalid_argument("'selector' is required"))?;
    let kind = crate::driver::SelectorKind::parse(step.arg_str("selectorType").unwrap_or("accessibilityId"));
    Ok((selector, kind))
}

/// Resolve the element named by `selector`/`selectorType` against the
/// current active app, via the Selector Resolver (C4).
pub async fn resolve_element(
    ctx: &ExecutionContext,
    step: &Step,
) -> Result<Option<Box<dyn crate::driver::ElementHandle>>> {
    let (selector, kind) = selector_args(step)?;
    let app = ctx.driver.active_app().await?;
    crate::selector::find_one(&*app, kind, selector).await
}

/// Deadline-loop `resolve_element` until it returns `Some`, or the
/// timeout elapses (§5: 100ms poll interval).
pub async fn wait_for_element(
    ctx: &ExecutionContext,
    step: &Step,
    timeout: Duration,
) -> Result<Option<Box<dyn crate::driver::ElementHandle>>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(el) = resolve_element(ctx, step).await? {
            return Ok(Some(el));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(crate::constants::POLL_INTERVAL).await;
    }
}

/// The key a handler writes to when `as` is present, else `None` (for
/// handlers where writing is optional, e.g. `includeInResults`).
pub fn as_key(step: &Step) -> Option<&str> {
    step.as_.as_deref()
}

#[cfg(test)]
mod handlers_test;

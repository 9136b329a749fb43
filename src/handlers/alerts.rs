//! Alert/sheet handling: `handleAlert`, `dismissAlert`, `acceptAlert`
//! (§4.4). All three succeed even when no alert is present — system
//! alerts are inherently racy, so "nothing to do" is not a failure.

use super::{step_timeout, ExecutionContext};
use crate::constants::{
    ACCEPT_ALERT_LABELS, DEFAULT_ALERT_RETRIES, DISMISS_ALERT_LABELS, POST_ALERT_TAP_SLEEP,
};
use crate::driver::ElementHandle;
use crate::error::{InterpError, Result};
use crate::model::Step;
use std::time::Instant;

/// Search order: springboard buttons, springboard alerts[0] buttons,
/// current app buttons, current app alerts[0] buttons, current app
/// sheets[0] buttons. Returns the first hittable match, if any.
async fn find_button(ctx: &ExecutionContext, label: &str) -> Result<Option<Box<dyn ElementHandle>>> {
    let springboard = ctx.driver.springboard().await?;
    let app = ctx.driver.active_app().await?;

    let mut candidates: Vec<Box<dyn ElementHandle>> = Vec::new();
    candidates.extend(springboard.buttons().await?);
    if let Some(alert) = springboard.alerts().await?.into_iter().next() {
        candidates.extend(alert.buttons().await?);
    }
    candidates.extend(app.buttons().await?);
    if let Some(alert) = app.alerts().await?.into_iter().next() {
        candidates.extend(alert.buttons().await?);
    }
    if let Some(sheet) = app.sheets().await?.into_iter().next() {
        candidates.extend(sheet.buttons().await?);
    }

    for button in candidates {
        if button.label().await?.as_deref() == Some(label) && button.is_hittable().await? {
            return Ok(Some(button));
        }
    }
    Ok(None)
}

async fn tap_first_matching(ctx: &ExecutionContext, labels: &[&str], timeout: std::time::Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    loop {
        for label in labels {
            if let Some(button) = find_button(ctx, label).await? {
                button.tap().await?;
                tokio::time::sleep(POST_ALERT_TAP_SLEEP).await;
                return Ok(());
            }
        }
        if Instant::now() >= deadline {
            return Ok(());
        }
        tokio::time::sleep(crate::constants::POLL_INTERVAL).await;
    }
}

/// `handleAlert{button, timeout=3, retries=1}` — taps the first hittable
/// match for the caller-supplied `button` label, retrying the
/// `timeout`-bounded search up to `retries` times; fails `NotFound` if
/// the button never appears (§4.4 — `optional:true` is what makes a
/// missing alert a non-error, not this primitive itself).
pub async fn handle_alert(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let button = step
        .arg_str("button")
        .ok_or_else(|| InterpError::invalid_argument("'button' is required"))?;
    let timeout = step_timeout(step, crate::constants::DEFAULT_ALERT_TIMEOUT_SECS as f64);
    let retries = step.arg_u64("retries").unwrap_or(DEFAULT_ALERT_RETRIES as u64);

    let mut attempt = 0;
    loop {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(handle) = find_button(ctx, button).await? {
                handle.tap().await?;
                tokio::time::sleep(POST_ALERT_TAP_SLEEP).await;
                return Ok(());
            }
            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(crate::constants::POLL_INTERVAL).await;
        }
        if attempt >= retries {
            return Err(InterpError::not_found(format!("alert button '{button}' not found")));
        }
        attempt += 1;
    }
}

/// `dismissAlert{timeout=2}` — tries `DISMISS_ALERT_LABELS` in order.
pub async fn dismiss_alert(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, crate::constants::DEFAULT_DISMISS_ACCEPT_TIMEOUT_SECS as f64);
    tap_first_matching(ctx, DISMISS_ALERT_LABELS, timeout).await
}

/// `acceptAlert{timeout=2}` — tries `ACCEPT_ALERT_LABELS` in order.
pub async fn accept_alert(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let timeout = step_timeout(step, crate::constants::DEFAULT_DISMISS_ACCEPT_TIMEOUT_SECS as f64);
    tap_first_matching(ctx, ACCEPT_ALERT_LABELS, timeout).await
}

#[cfg(test)]
mod alerts_test;

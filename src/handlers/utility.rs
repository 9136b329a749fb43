//! Device-level utility actions: `sleep`, `screenshot`, `home`, `lock`,
//! `unlock`, `log` (§4.4).

use super::ExecutionContext;
use crate::codec::{DefaultCodec, ImageCodec};
use crate::constants::DEFAULT_SLEEP_SECS;
use crate::error::Result;
use crate::model::{Step, StepEvent};
use crate::value::VarValue;
use base64::Engine;
use std::time::Duration;

/// `sleep{duration|timeout=1}`.
pub async fn sleep(_ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let secs = step
        .arg_f64("duration")
        .or_else(|| step.arg_f64("timeout"))
        .unwrap_or(DEFAULT_SLEEP_SECS);
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    Ok(())
}

/// `screenshot{as, full=false, includeInResults=false}` — base64-encodes
/// the capture (PNG when `full`, else JPEG q=0.7), emits a `screenshot`
/// event, and optionally writes the data URI to the Value Store (§4.4).
pub async fn screenshot(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let full = step.arg_bool("full").unwrap_or(false);
    let include = step.arg_bool("includeInResults").unwrap_or(false);
    let key = step.as_.clone().unwrap_or_else(|| "screenshot".to_string());

    let frame = ctx.driver.capture_screenshot().await?;
    let (bytes, ext) = DefaultCodec.encode(&frame, full)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

    ctx.sink
        .emit(StepEvent::Screenshot {
            timestamp_ms: now_ms(),
            key: key.clone(),
            size: bytes.len(),
        })
        .await;

    if include {
        let mime = if ext == "png" { "image/png" } else { "image/jpeg" };
        ctx.store.set_both(&key, VarValue::String(format!("data:{mime};base64,{encoded}")));
    }
    Ok(())
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// `home` — presses the Home button.
pub async fn home(ctx: &ExecutionContext, _step: &Step) -> Result<()> {
    ctx.driver.press_home().await
}

/// `lock` — locks the device.
pub async fn lock(ctx: &ExecutionContext, _step: &Step) -> Result<()> {
    ctx.driver.lock().await
}

/// `unlock` — unlocks the device.
pub async fn unlock(ctx: &ExecutionContext, _step: &Step) -> Result<()> {
    ctx.driver.unlock().await
}

/// `log{level, message}` — emits a `log` stream event; never fails.
pub async fn log(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let level = step.arg_str("level").unwrap_or("info").to_string();
    let message = step.arg_str("message").unwrap_or("").to_string();
    match level.as_str() {
        "error" => tracing::error!(%message, "script log"),
        "warn" => tracing::warn!(%message, "script log"),
        "debug" => tracing::debug!(%message, "script log"),
        _ => tracing::info!(%message, "script log"),
    }
    ctx.sink
        .emit(StepEvent::Log { timestamp_ms: now_ms(), level, message })
        .await;
    Ok(())
}

#[cfg(test)]
mod utility_test;

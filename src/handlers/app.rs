//! App lifecycle: `launch`, `terminate`, `activate`, `isRunning` (§4.4).

use super::ExecutionContext;
use crate::constants::{
    DEFAULT_LAUNCH_RETRIES, DEFAULT_LAUNCH_RETRY_DELAY_SECS, DEFAULT_LAUNCH_TIMEOUT_SECS,
    DEFAULT_TERMINATE_TIMEOUT_SECS, VAR_APP_BUNDLE_ID, VAR_APP_STATE,
};
use crate::driver::AppState;
use crate::error::{InterpError, Result};
use crate::model::Step;
use crate::value::VarValue;
use std::collections::HashMap;
use std::time::{Duration, Instant};

fn bundle_id(step: &Step) -> Result<&str> {
    step.arg_str("bundleId")
        .ok_or_else(|| InterpError::invalid_argument("'bundleId' is required"))
}

/// `launch{bundleId, arguments?, environment?, wait=true, timeout=30,
/// retries=1, retryDelay=2}` (§4.4).
pub async fn launch(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let id = bundle_id(step)?;
    let arguments: Vec<String> = step
        .arg("arguments")
        .and_then(|v| v.as_array())
        .map(|a| a.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default();
    let environment: HashMap<String, String> = step
        .arg("environment")
        .and_then(|v| v.as_object())
        .map(|m| {
            m.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default();
    let wait = step.arg_bool("wait").unwrap_or(true);
    let timeout = Duration::from_secs_f64(
        step.arg_f64("timeout").unwrap_or(DEFAULT_LAUNCH_TIMEOUT_SECS as f64),
    );
    let retries = step.arg_u64("retries").unwrap_or(DEFAULT_LAUNCH_RETRIES as u64);
    let retry_delay = Duration::from_secs_f64(
        step.arg_f64("retryDelay").unwrap_or(DEFAULT_LAUNCH_RETRY_DELAY_SECS as f64),
    );

    let mut attempt = 0;
    loop {
        let app = ctx.driver.app_by_bundle(id).await?;
        app.launch(&arguments, &environment).await?;

        if !wait {
            ctx.set_current_bundle_id(id);
            ctx.store.set_both(VAR_APP_BUNDLE_ID, VarValue::String(id.to_string()));
            ctx.store.set_both(VAR_APP_STATE, VarValue::String(AppState::Foreground.as_str().into()));
            return Ok(());
        }

        let deadline = Instant::now() + timeout;
        loop {
            let state = app.state().await?;
            if state == AppState::Foreground {
                ctx.set_current_bundle_id(id);
                ctx.store.set_both(VAR_APP_BUNDLE_ID, VarValue::String(id.to_string()));
                ctx.store.set_both(VAR_APP_STATE, VarValue::String(state.as_str().into()));
                return Ok(());
            }
            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(crate::constants::POLL_INTERVAL).await;
        }

        if attempt >= retries {
            return Err(InterpError::timeout(format!("{id} did not reach foreground")));
        }
        attempt += 1;
        tokio::time::sleep(retry_delay).await;
    }
}

/// `terminate{bundleId, timeout=5}` — success even if the app does not
/// fully quit within the grace window (§4.4).
pub async fn terminate(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let id = bundle_id(step)?;
    let timeout = Duration::from_secs_f64(
        step.arg_f64("timeout").unwrap_or(DEFAULT_TERMINATE_TIMEOUT_SECS as f64),
    );
    let app = ctx.driver.app_by_bundle(id).await?;
    app.terminate().await?;

    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if app.state().await? == AppState::NotRunning {
            break;
        }
        tokio::time::sleep(crate::constants::POLL_INTERVAL).await;
    }
    Ok(())
}

/// `activate{bundleId}` — brings app to foreground; sets current app
/// (§4.4).
pub async fn activate(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let id = bundle_id(step)?;
    let app = ctx.driver.app_by_bundle(id).await?;
    app.activate().await?;
    ctx.set_current_bundle_id(id);
    ctx.store.set_both(VAR_APP_BUNDLE_ID, VarValue::String(id.to_string()));
    Ok(())
}

/// `isRunning{bundleId, as}` — writes `"true"`/`"false"` (§4.4).
pub async fn is_running(ctx: &ExecutionContext, step: &Step) -> Result<()> {
    let id = bundle_id(step)?;
    let app = ctx.driver.app_by_bundle(id).await?;
    let running = app.state().await? != AppState::NotRunning;
    if let Some(key) = super::as_key(step) {
        ctx.store.set_both(key, VarValue::Bool(running));
    }
    Ok(())
}

#[cfg(test)]
mod app_test;

use super::*;
use crate::config::LimitsConfig;
use crate::driver::mock::MockDriver;
use crate::event::NullSink;
use crate::vision::mock::MockVision;
use std::sync::Arc;
use std::time::Instant;

fn ctx() -> ExecutionContext {
    ExecutionContext::new(
        Arc::new(MockDriver::new()),
        Arc::new(MockVision::new()),
        Arc::new(NullSink),
        LimitsConfig::default(),
    )
}

fn step_with(json: serde_json::Value) -> Step {
    Step { args: json.as_object().cloned().unwrap(), ..Step::default() }
}

#[tokio::test]
async fn sleep_waits_approximately_the_requested_duration() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"duration": 0.05}));
    let start = Instant::now();
    sleep(&ctx, &step).await.unwrap();
    assert!(start.elapsed().as_millis() >= 40);
}

#[tokio::test]
async fn screenshot_writes_data_uri_when_included() {
    let ctx = ctx();
    let mut step = step_with(serde_json::json!({"includeInResults": true}));
    step.as_ = Some("shot".to_string());
    screenshot(&ctx, &step).await.unwrap();
    let uri = ctx.store.get_result("shot").unwrap();
    assert!(uri.starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn screenshot_full_uses_png() {
    let ctx = ctx();
    let mut step = step_with(serde_json::json!({"includeInResults": true, "full": true}));
    step.as_ = Some("shot".to_string());
    screenshot(&ctx, &step).await.unwrap();
    let uri = ctx.store.get_result("shot").unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn home_lock_unlock_always_succeed() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({}));
    home(&ctx, &step).await.unwrap();
    lock(&ctx, &step).await.unwrap();
    unlock(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn log_never_fails() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"level": "warn", "message": "hello"}));
    log(&ctx, &step).await.unwrap();
}

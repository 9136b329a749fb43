use super::*;
use crate::config::LimitsConfig;
use crate::driver::mock::MockDriver;
use crate::event::NullSink;
use crate::vision::mock::MockVision;
use std::sync::Arc;

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
async fn launch_sets_current_bundle_and_state() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"bundleId": "com.example.app"}));
    launch(&ctx, &step).await.unwrap();
    assert_eq!(ctx.current_bundle_id(), Some("com.example.app".to_string()));
    assert_eq!(ctx.store.get_result("_appState"), Some("foreground".to_string()));
}

#[tokio::test]
async fn launch_requires_bundle_id() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({}));
    assert!(launch(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn is_running_reports_false_before_launch() {
    let ctx = ctx();
    let mut step = step_with(serde_json::json!({"bundleId": "com.example.app"}));
    step.as_ = Some("running".to_string());
    is_running(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("running"), Some("false".to_string()));
}

#[tokio::test]
async fn terminate_is_success_even_when_already_stopped() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"bundleId": "com.example.app"}));
    terminate(&ctx, &step).await.unwrap();
}

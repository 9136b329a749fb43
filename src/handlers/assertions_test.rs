use super::*;
use crate::config::LimitsConfig;
use crate::driver::mock::{MockDriver, MockElementSpec};
use crate::event::NullSink;
use crate::vision::mock::MockVision;
use std::sync::Arc;

fn ctx_with(driver: MockDriver) -> ExecutionContext {
    ExecutionContext::new(
        Arc::new(driver),
        Arc::new(MockVision::new()),
        Arc::new(NullSink),
        LimitsConfig::default(),
    )
}

fn step_with(json: serde_json::Value) -> Step {
    Step { args: json.as_object().cloned().unwrap(), ..Step::default() }
}

#[tokio::test]
async fn assert_exists_succeeds_when_element_present() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("ok"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "ok"}));
    assert_exists(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn assert_exists_fails_when_absent() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"selector": "nope"}));
    let err = assert_exists(&ctx, &step).await.unwrap_err();
    assert_eq!(err.kind(), "assertionFailed");
}

#[tokio::test]
async fn assert_not_exists_succeeds_when_absent() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"selector": "nope"}));
    assert_not_exists(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn assert_text_matches_expected() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("greeting"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "greeting", "expected": "greeting"}));
    assert_text(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn assert_text_contains_fails_with_custom_message() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("greeting"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({
        "selector": "greeting",
        "contains": "zzz",
        "message": "custom failure"
    }));
    let err = assert_text(&ctx, &step).await.unwrap_err();
    assert_eq!(err.message(), "assertion failed: custom failure");
}

#[tokio::test]
async fn assert_condition_true_evaluates_store() {
    let ctx = ctx_with(MockDriver::new());
    ctx.store.set_variable("flag", crate::value::VarValue::Bool(true));
    let step = step_with(serde_json::json!({"condition": "true", "key": "flag"}));
    assert(&ctx, &step).await.unwrap();
}

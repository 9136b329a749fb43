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
async fn type_text_requires_value_or_text() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("field"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "field"}));
    assert!(type_text(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn type_text_accepts_value_key() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("field"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "field", "value": "hello"}));
    type_text(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn type_text_accepts_text_key_alias() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("field"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "field", "text": "hi"}));
    type_text(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn paste_text_sets_pasteboard_and_pastes() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("field"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "field", "text": "pasted"}));
    paste_text(&ctx, &step).await.unwrap();
}

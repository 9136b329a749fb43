use super::*;
use crate::config::LimitsConfig;
use crate::driver::mock::{MockDriver, MockElementSpec};
use crate::event::NullSink;
use crate::value::VarValue;
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
async fn tap_xy_accepts_literal_coords() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"x": 10.0, "y": 20.0}));
    tap_xy(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn tap_xy_resolves_via_var_names() {
    let ctx = ctx_with(MockDriver::new());
    ctx.store.set_variable("px", VarValue::Number(5.0));
    ctx.store.set_variable("py", VarValue::Number(6.0));
    let step = step_with(serde_json::json!({"xVar": "px", "yVar": "py"}));
    tap_xy(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn tap_xy_missing_coords_errors() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({}));
    assert!(tap_xy(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn swipe_drags_between_explicit_coords() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"x": 100.0, "y": 700.0, "toX": 100.0, "toY": 100.0}));
    swipe(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn swipe_missing_to_coords_errors() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"x": 100.0, "y": 700.0}));
    assert!(swipe(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn swipe_element_rejects_unknown_direction() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("list"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "list", "direction": "sideways"}));
    assert!(swipe_element(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn scroll_acts_on_resolved_element() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("list"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "list", "direction": "down"}));
    scroll(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn scroll_without_selector_falls_back_to_screen_center() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"direction": "down"}));
    scroll(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn pinch_acts_on_resolved_element() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("map"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "map", "scale": 2.0}));
    pinch(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn pinch_without_selector_falls_back_to_screen_center() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"scale": 0.5}));
    pinch(&ctx, &step).await.unwrap();
}

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
async fn click_requires_hittable_element() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("btn0"));
    let ctx = ctx_with(driver);
    let step = step_with(serde_json::json!({"selector": "btn0"}));
    click(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn click_missing_element_times_out() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"selector": "nope", "timeout": 0.2}));
    assert!(click(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn read_writes_label_by_default() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("btn0"));
    let ctx = ctx_with(driver);
    let mut step = step_with(serde_json::json!({"selector": "btn0"}));
    step.as_ = Some("label".to_string());
    read(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("label"), Some("btn0".to_string()));
}

#[tokio::test]
async fn exists_reports_false_without_waiting() {
    let ctx = ctx_with(MockDriver::new());
    let mut step = step_with(serde_json::json!({"selector": "nope"}));
    step.as_ = Some("found".to_string());
    exists(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("found"), Some("false".to_string()));
}

#[tokio::test]
async fn get_rect_writes_sibling_keys() {
    let driver = MockDriver::new();
    driver.register_element(MockElementSpec::button("btn0"));
    let ctx = ctx_with(driver);
    let mut step = step_with(serde_json::json!({"selector": "btn0"}));
    step.as_ = Some("r".to_string());
    get_rect(&ctx, &step).await.unwrap();
    assert!(ctx.store.get_result("r_centerX").is_some());
    assert!(ctx.store.get_result("r_centerY").is_some());
}

#[tokio::test]
async fn find_elements_populates_cache_and_count() {
    let driver = MockDriver::new();
    for i in 0..3 {
        driver.register_element(MockElementSpec::button(&format!("btn{i}")));
    }
    let ctx = ctx_with(driver);
    let mut step = step_with(serde_json::json!({"selector": "btn", "selectorType": "labelContains"}));
    step.as_ = Some("found".to_string());
    find_elements(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("found_count"), Some("3".to_string()));
    assert_eq!(ctx.element_cache.read().len(), 3);
}

#[tokio::test]
async fn click_nth_uses_cached_descriptor() {
    let driver = MockDriver::new();
    for i in 0..3 {
        driver.register_element(MockElementSpec::button(&format!("btn{i}")));
    }
    let ctx = ctx_with(driver);
    let mut find_step = step_with(serde_json::json!({"selector": "btn", "selectorType": "labelContains"}));
    find_step.as_ = Some("found".to_string());
    find_elements(&ctx, &find_step).await.unwrap();

    let nth_step = step_with(serde_json::json!({"index": 0}));
    click_nth(&ctx, &nth_step).await.unwrap();
}

#[tokio::test]
async fn click_nth_out_of_range_errors() {
    let ctx = ctx_with(MockDriver::new());
    let step = step_with(serde_json::json!({"index": 99}));
    assert!(click_nth(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn count_elements_reports_match_count() {
    let driver = MockDriver::new();
    for i in 0..4 {
        driver.register_element(MockElementSpec::button(&format!("btn{i}")));
    }
    let ctx = ctx_with(driver);
    let mut step = step_with(serde_json::json!({"selector": "btn", "selectorType": "labelContains"}));
    step.as_ = Some("n".to_string());
    count_elements(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("n"), Some("4".to_string()));
}

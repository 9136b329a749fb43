use super::*;
use crate::config::LimitsConfig;
use crate::driver::mock::MockDriver;
use crate::event::NullSink;
use crate::vision::mock::MockVision;
use std::sync::Arc;

fn ctx_with(vision: MockVision) -> ExecutionContext {
    ExecutionContext::new(
        Arc::new(MockDriver::new()),
        Arc::new(vision),
        Arc::new(NullSink),
        LimitsConfig::default(),
    )
}

fn step_with(json: serde_json::Value) -> Step {
    Step { args: json.as_object().cloned().unwrap(), ..Step::default() }
}

#[tokio::test]
async fn find_text_reports_match_and_point() {
    let vision = MockVision::new();
    vision.with_text("Continue", Point { x: 50.0, y: 60.0 });
    let ctx = ctx_with(vision);
    let mut step = step_with(serde_json::json!({"text": "continue"}));
    step.as_ = Some("hit".to_string());
    find_text(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("hit_found"), Some("true".to_string()));
    assert_eq!(ctx.store.get_result("hit_x"), Some("50".to_string()));
}

#[tokio::test]
async fn find_text_reports_no_match() {
    let ctx = ctx_with(MockVision::new());
    let mut step = step_with(serde_json::json!({"text": "nope"}));
    step.as_ = Some("hit".to_string());
    find_text(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("hit_found"), Some("false".to_string()));
}

#[tokio::test]
async fn click_text_times_out_when_not_visible() {
    let ctx = ctx_with(MockVision::new());
    let step = step_with(serde_json::json!({"text": "Go", "timeout": 0.2}));
    assert!(click_text(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn click_text_taps_flipped_point() {
    let vision = MockVision::new();
    vision.with_text("Go", Point { x: 10.0, y: 20.0 });
    let ctx = ctx_with(vision);
    let step = step_with(serde_json::json!({"text": "go", "timeout": 0.2}));
    click_text(&ctx, &step).await.unwrap();
}

#[tokio::test]
async fn read_screen_writes_joined_text() {
    let vision = MockVision::new();
    vision.with_text("Hello", Point { x: 0.0, y: 0.0 });
    vision.with_text("World", Point { x: 0.0, y: 0.0 });
    let ctx = ctx_with(vision);
    let mut step = step_with(serde_json::json!({}));
    step.as_ = Some("screen".to_string());
    read_screen(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("screen"), Some("Hello World".to_string()));
}

#[tokio::test]
async fn read_region_requires_dimensions() {
    let ctx = ctx_with(MockVision::new());
    let step = step_with(serde_json::json!({"regionX": 0, "regionY": 0}));
    assert!(read_region(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn click_image_rejects_invalid_base64() {
    let ctx = ctx_with(MockVision::new());
    let step = step_with(serde_json::json!({"imageBase64": "not-base64!", "timeout": 0.1}));
    assert!(click_image(&ctx, &step).await.is_err());
}

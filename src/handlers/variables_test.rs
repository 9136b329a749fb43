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
async fn set_writes_variables_by_default() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"key": "name", "value": "Ada"}));
    set(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("name"), Some("Ada".to_string()));
}

#[tokio::test]
async fn set_results_only_target_skips_variables() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"key": "name", "value": "Ada", "target": "results"}));
    set(&ctx, &step).await.unwrap();
    assert!(ctx.store.get_variable("name").is_none());
    assert_eq!(ctx.store.get_result("name"), Some("Ada".to_string()));
}

#[tokio::test]
async fn increment_defaults_missing_key_to_zero() {
    let ctx = ctx();
    let mut step = step_with(serde_json::json!({"key": "n"}));
    step.as_ = None;
    increment(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("n"), Some("1".to_string()));
}

#[tokio::test]
async fn decrement_subtracts_by() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"key": "n", "by": 3}));
    increment(&ctx, &step_with(serde_json::json!({"key": "n", "by": 10}))).await.unwrap();
    decrement(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("n"), Some("7".to_string()));
}

#[tokio::test]
async fn concat_joins_with_separator() {
    let ctx = ctx();
    let mut step = step_with(serde_json::json!({"values": ["a", "b", 1], "separator": "-"}));
    step.as_ = Some("joined".to_string());
    concat(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("joined"), Some("a-b-1".to_string()));
}

#[tokio::test]
async fn math_add_literal_operands() {
    let ctx = ctx();
    let mut step = step_with(serde_json::json!({"operation": "add", "a": 2, "b": 3}));
    step.as_ = Some("sum".to_string());
    math(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("sum"), Some("5".to_string()));
}

#[tokio::test]
async fn math_divide_by_zero_errors() {
    let ctx = ctx();
    let step = step_with(serde_json::json!({"operation": "divide", "a": 2, "b": 0}));
    assert!(math(&ctx, &step).await.is_err());
}

#[tokio::test]
async fn math_unary_ignores_b() {
    let ctx = ctx();
    let mut step = step_with(serde_json::json!({"operation": "ceil", "a": 2.1}));
    step.as_ = Some("r".to_string());
    math(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("r"), Some("3".to_string()));
}

#[tokio::test]
async fn math_uses_var_operands() {
    let ctx = ctx();
    ctx.store.set_variable("x", crate::value::VarValue::Number(10.0));
    let mut step = step_with(serde_json::json!({"operation": "subtract", "aVar": "x", "b": 4}));
    step.as_ = Some("r".to_string());
    math(&ctx, &step).await.unwrap();
    assert_eq!(ctx.store.get_result("r"), Some("6".to_string()));
}

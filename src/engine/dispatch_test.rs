use super::*;
use crate::config::LimitsConfig;
use crate::driver::mock::MockDriver;
use crate::event::NullSink;
use crate::model::Step;
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

#[tokio::test]
async fn unknown_action_is_invalid_argument() {
    let ctx = ctx();
    let step = Step { action: "bogus".into(), ..Step::default() };
    let err = dispatch(&ctx, "bogus", &step).await.unwrap_err();
    assert_eq!(err.kind(), "invalidArgument");
}

#[tokio::test]
async fn sleep_action_routes_to_utility_handler() {
    let ctx = ctx();
    let mut step = Step::default();
    step.args.insert("duration".into(), serde_json::json!(0.01));
    dispatch(&ctx, "sleep", &step).await.unwrap();
}

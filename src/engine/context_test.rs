use super::*;
use crate::config::LimitsConfig;
use crate::driver::mock::MockDriver;
use crate::event::NullSink;
use crate::vision::mock::MockVision;

fn ctx() -> ExecutionContext {
    ExecutionContext::new(
        Arc::new(MockDriver::new()),
        Arc::new(MockVision::new()),
        Arc::new(NullSink),
        LimitsConfig::default(),
    )
}

#[test]
fn break_signal_is_one_shot() {
    let signals = SignalState::new();
    assert!(!signals.take_break());
    signals.set_break();
    assert!(signals.is_break_set());
    assert!(signals.take_break());
    assert!(!signals.is_break_set());
}

#[test]
fn stop_signal_persists_until_checked() {
    let signals = SignalState::new();
    signals.set_stop();
    assert!(signals.is_stop_set());
    assert!(signals.is_stop_set());
}

#[test]
fn current_bundle_id_round_trips() {
    let ctx = ctx();
    assert_eq!(ctx.current_bundle_id(), None);
    ctx.set_current_bundle_id("com.example.app");
    assert_eq!(ctx.current_bundle_id(), Some("com.example.app".to_string()));
}

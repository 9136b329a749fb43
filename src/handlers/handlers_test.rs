use super::*;

#[test]
fn step_timeout_falls_back_to_default() {
    let step = Step::default();
    assert_eq!(step_timeout(&step, 10.0), Duration::from_secs(10));
}

#[test]
fn selector_args_requires_selector() {
    let step = Step::default();
    assert!(selector_args(&step).is_err());
}

#[test]
fn selector_args_defaults_to_accessibility_id() {
    let mut step = Step::default();
    step.args.insert("selector".into(), serde_json::json!("Go"));
    let (selector, kind) = selector_args(&step).unwrap();
    assert_eq!(selector, "Go");
    assert_eq!(kind, crate::driver::SelectorKind::AccessibilityId);
}

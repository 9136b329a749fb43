use super::*;

#[test]
fn step_deserializes_flattened_args() {
    let json = r#"{"action":"click","selector":"Go","selectorType":"accessibilityId","optional":true}"#;
    let step: Step = serde_json::from_str(json).unwrap();
    assert_eq!(step.action, "click");
    assert!(step.optional);
    assert_eq!(step.arg_str("selector"), Some("Go"));
    assert_eq!(step.arg_str("selectorType"), Some("accessibilityId"));
}

#[test]
fn step_keeps_control_flow_children() {
    let json = r#"{"action":"if","condition":"exists","then":[{"action":"log","message":"hi"}],"else":[]}"#;
    let step: Step = serde_json::from_str(json).unwrap();
    assert_eq!(step.then.as_ref().unwrap().len(), 1);
    assert_eq!(step.else_.as_ref().unwrap().len(), 0);
}

#[test]
fn script_request_requires_steps_but_allows_empty() {
    let json = r#"{"steps":[]}"#;
    let req: ScriptRequest = serde_json::from_str(json).unwrap();
    assert!(req.steps.is_empty());
    assert!(req.variables.is_none());
}

#[test]
fn rect_center_is_midpoint() {
    let r = Rect { x: 10.0, y: 20.0, width: 100.0, height: 50.0 };
    assert_eq!(r.center_x(), 60.0);
    assert_eq!(r.center_y(), 45.0);
}

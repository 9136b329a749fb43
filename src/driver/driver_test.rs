use super::*;

#[test]
fn selector_kind_aliases_id_to_accessibility_id() {
    assert_eq!(SelectorKind::parse("id"), SelectorKind::AccessibilityId);
    assert_eq!(
        SelectorKind::parse("accessibilityId"),
        SelectorKind::AccessibilityId
    );
}

#[test]
fn selector_kind_defaults_unknown_to_accessibility_id() {
    assert_eq!(SelectorKind::parse("bogus"), SelectorKind::AccessibilityId);
}

#[test]
fn swipe_direction_parses_known_values_only() {
    assert_eq!(SwipeDirection::parse("up"), Some(SwipeDirection::Up));
    assert_eq!(SwipeDirection::parse("diagonal"), None);
}

#[test]
fn app_state_as_str_round_trips() {
    assert_eq!(AppState::Foreground.as_str(), "foreground");
}

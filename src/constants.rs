//! Crate-wide constants
//!
//! Default timeouts, poll intervals, ordered probe/search lists, and
//! reserved variable names used throughout the interpreter.

use std::time::Duration;

// ============================================================================
// TIMEOUTS & POLL INTERVALS
// ============================================================================

/// Default per-step timeout when a handler doesn't specify its own.
pub const DEFAULT_STEP_TIMEOUT_SECS: u64 = 10;

/// Default `while` loop bound (§4.5).
pub const DEFAULT_MAX_LOOP_ITERATIONS: u32 = 100;

/// Default `while` sleep between iterations, in seconds.
pub const DEFAULT_WHILE_INTERVAL_SECS: f64 = 0.1;

/// Deadline-loop poll interval for UI-driver based waits (§5).
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Deadline-loop poll interval for OCR/template based waits (§5).
pub const VISION_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Sleep after tapping an alert button, before returning (§4.4).
pub const POST_ALERT_TAP_SLEEP: Duration = Duration::from_millis(300);

/// Default `launch` app-foreground timeout.
pub const DEFAULT_LAUNCH_TIMEOUT_SECS: u64 = 30;

/// Default `launch` retry count.
pub const DEFAULT_LAUNCH_RETRIES: u32 = 1;

/// Default delay between `launch` retries.
pub const DEFAULT_LAUNCH_RETRY_DELAY_SECS: u64 = 2;

/// Default `terminate` grace window.
pub const DEFAULT_TERMINATE_TIMEOUT_SECS: u64 = 5;

/// Default `handleAlert` timeout/retries.
pub const DEFAULT_ALERT_TIMEOUT_SECS: u64 = 3;
/// Default `dismissAlert`/`acceptAlert` timeout.
pub const DEFAULT_DISMISS_ACCEPT_TIMEOUT_SECS: u64 = 2;
pub const DEFAULT_ALERT_RETRIES: u32 = 1;

/// Default `longPressXY` duration.
pub const DEFAULT_LONG_PRESS_DURATION_SECS: f64 = 1.0;

/// Default `swipe` duration.
pub const DEFAULT_SWIPE_DURATION_SECS: f64 = 0.3;

/// Default `scroll` distance in points.
pub const DEFAULT_SCROLL_DISTANCE: f64 = 200.0;

/// Default `pinch` scale/velocity.
pub const DEFAULT_PINCH_SCALE: f64 = 1.0;
pub const DEFAULT_PINCH_VELOCITY: f64 = 1.0;

/// Default `sleep` duration in seconds.
pub const DEFAULT_SLEEP_SECS: f64 = 1.0;

/// Default screenshot JPEG quality when `full` is false (§4.4).
pub const SCREENSHOT_JPEG_QUALITY: u8 = 70;

/// Default `clickImage`/`waitImage` confidence threshold.
pub const DEFAULT_TEMPLATE_CONFIDENCE: f64 = 0.8;

/// Template matcher coarse grid step, in pixels (§4.4).
pub const TEMPLATE_MATCH_GRID_STEP: u32 = 4;

/// Template matcher pixel sampling stride within a candidate window.
pub const TEMPLATE_MATCH_SAMPLE_STRIDE: u32 = 4;

/// Internal safety timeout wrapping an async vision call (§5).
pub const VISION_CALL_SAFETY_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// ALERT BUTTON SEARCH ORDER (§4.4)
// ============================================================================

/// Ordered label candidates tried by `dismissAlert`.
pub const DISMISS_ALERT_LABELS: &[&str] = &[
    "Cancel",
    "No",
    "Don't Allow",
    "Not Now",
    "Later",
    "Dismiss",
    "Close",
];

/// Ordered label candidates tried by `acceptAlert`.
pub const ACCEPT_ALERT_LABELS: &[&str] = &[
    "OK",
    "Allow",
    "Yes",
    "Accept",
    "Continue",
    "Open",
    "Allow Full Access",
    "Allow While Using App",
];

// ============================================================================
// SELECTOR RESOLUTION (§4.1)
// ============================================================================

/// Ordered `accessibilityId` element-type shortcuts probed before falling
/// back to a generic `identifier == S OR label == S` query.
pub const ACCESSIBILITY_ID_SHORTCUTS: &[&str] = &[
    "buttons",
    "staticTexts",
    "textFields",
    "secureTextFields",
    "textViews",
    "images",
    "cells",
    "switches",
    "sliders",
    "tables",
    "collectionViews",
    "otherElements",
];

// ============================================================================
// DATE PARSING (§4.4)
// ============================================================================

/// Default format list tried, in order, by `parseDate` when `formats` is
/// not supplied, expressed in the spec's reference (Unicode LDML-style)
/// notation; `dates.rs` carries the strftime translation.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "M/d/yyyy h:mm a",
    "MM/dd h:mm a",
    "h:mm a",
    "yyyy-MM-dd HH:mm:ss",
    "yyyy-MM-dd",
    "MMM dd, yyyy",
    "MMM d",
];

// ============================================================================
// RESERVED VARIABLE NAMES (§6)
// ============================================================================

pub const VAR_ITERATION: &str = "_iteration";
pub const VAR_INDEX: &str = "_index";
pub const VAR_ERROR: &str = "_error";
pub const VAR_RETURN_VALUE: &str = "_returnValue";
pub const VAR_APP_BUNDLE_ID: &str = "_appBundleId";
pub const VAR_APP_STATE: &str = "_appState";

/// All reserved names, for warnings when a script writes one directly
/// via `set`.
pub const RESERVED_VARIABLE_NAMES: &[&str] = &[
    VAR_ITERATION,
    VAR_INDEX,
    VAR_ERROR,
    VAR_RETURN_VALUE,
    VAR_APP_BUNDLE_ID,
    VAR_APP_STATE,
];

// ============================================================================
// SIBLING-KEY SUFFIXES (§3)
// ============================================================================

pub const SUFFIX_X: &str = "_x";
pub const SUFFIX_Y: &str = "_y";
pub const SUFFIX_WIDTH: &str = "_width";
pub const SUFFIX_HEIGHT: &str = "_height";
pub const SUFFIX_CENTER_X: &str = "_centerX";
pub const SUFFIX_CENTER_Y: &str = "_centerY";
pub const SUFFIX_YEAR: &str = "_year";
pub const SUFFIX_MONTH: &str = "_month";
pub const SUFFIX_DAY: &str = "_day";
pub const SUFFIX_HOUR: &str = "_hour";
pub const SUFFIX_MINUTE: &str = "_minute";
pub const SUFFIX_TIMESTAMP: &str = "_timestamp";
pub const SUFFIX_COUNT: &str = "_count";
pub const SUFFIX_FOUND: &str = "_found";

// ============================================================================
// MISC DEFAULTS
// ============================================================================

/// Default `findElements` result key when `as` is omitted.
pub const DEFAULT_ELEMENTS_KEY: &str = "elements";

/// Default `forEach` item/index variable names.
pub const DEFAULT_ITEM_VAR: &str = "item";
pub const DEFAULT_INDEX_VAR: &str = "index";

/// Default HTTP bind host/port (overridable via `Config`).
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 8100;

#[cfg(test)]
mod constants_test;

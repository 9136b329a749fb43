//! The Step Dispatcher (C6): a static mapping from `action` to a handler
//! (§4.3). Interpolation already happened by the time `dispatch` sees the
//! step; unknown actions fail with `InvalidArgument` naming the action.

use super::context::ExecutionContext;
use crate::error::{InterpError, Result};
use crate::handlers;
use crate::model::Step;

pub async fn dispatch(ctx: &ExecutionContext, action: &str, step: &Step) -> Result<()> {
    match action {
        // App lifecycle
        "launch" => handlers::app::launch(ctx, step).await,
        "terminate" => handlers::app::terminate(ctx, step).await,
        "activate" => handlers::app::activate(ctx, step).await,
        "isRunning" => handlers::app::is_running(ctx, step).await,

        // Single-element actions
        "click" | "tap" => handlers::element::click(ctx, step).await,
        "wait" => handlers::element::wait(ctx, step).await,
        "waitDisappear" => handlers::element::wait_disappear(ctx, step).await,
        "read" => handlers::element::read(ctx, step).await,
        "exists" => handlers::element::exists(ctx, step).await,
        "getRect" => handlers::element::get_rect(ctx, step).await,
        "clear" => handlers::element::clear(ctx, step).await,

        // Multi-element actions
        "findElements" => handlers::element::find_elements(ctx, step).await,
        "countElements" => handlers::element::count_elements(ctx, step).await,
        "clickNth" => handlers::element::click_nth(ctx, step).await,
        "readNth" => handlers::element::read_nth(ctx, step).await,

        // Alerts
        "handleAlert" => handlers::alerts::handle_alert(ctx, step).await,
        "dismissAlert" => handlers::alerts::dismiss_alert(ctx, step).await,
        "acceptAlert" => handlers::alerts::accept_alert(ctx, step).await,

        // Picker
        "setPicker" => handlers::picker::set_picker(ctx, step).await,
        "getPicker" => handlers::picker::get_picker(ctx, step).await,

        // Coordinates & gestures
        "tapXY" => handlers::coordinates::tap_xy(ctx, step).await,
        "doubleTapXY" => handlers::coordinates::double_tap_xy(ctx, step).await,
        "longPressXY" => handlers::coordinates::long_press_xy(ctx, step).await,
        "swipe" => handlers::coordinates::swipe(ctx, step).await,
        "swipeElement" => handlers::coordinates::swipe_element(ctx, step).await,
        "scroll" => handlers::coordinates::scroll(ctx, step).await,
        "pinch" => handlers::coordinates::pinch(ctx, step).await,

        // Input
        "type" => handlers::input::type_text(ctx, step).await,
        "pasteText" => handlers::input::paste_text(ctx, step).await,

        // Utility
        "sleep" => handlers::utility::sleep(ctx, step).await,
        "screenshot" => handlers::utility::screenshot(ctx, step).await,
        "home" => handlers::utility::home(ctx, step).await,
        "lock" => handlers::utility::lock(ctx, step).await,
        "unlock" => handlers::utility::unlock(ctx, step).await,
        "log" => handlers::utility::log(ctx, step).await,

        // Variables & math
        "set" => handlers::variables::set(ctx, step).await,
        "getVar" => handlers::variables::get_var(ctx, step).await,
        "increment" => handlers::variables::increment(ctx, step).await,
        "decrement" => handlers::variables::decrement(ctx, step).await,
        "concat" => handlers::variables::concat(ctx, step).await,
        "math" => handlers::variables::math(ctx, step).await,

        // Dates
        "parseDate" => handlers::dates::parse_date(ctx, step).await,
        "formatDate" => handlers::dates::format_date(ctx, step).await,

        // Assertions
        "assert" => handlers::assertions::assert(ctx, step).await,
        "assertExists" => handlers::assertions::assert_exists(ctx, step).await,
        "assertNotExists" => handlers::assertions::assert_not_exists(ctx, step).await,
        "assertText" => handlers::assertions::assert_text(ctx, step).await,

        // OCR / template match
        "clickText" => handlers::vision_handlers::click_text(ctx, step).await,
        "waitText" => handlers::vision_handlers::wait_text(ctx, step).await,
        "findText" => handlers::vision_handlers::find_text(ctx, step).await,
        "readScreen" => handlers::vision_handlers::read_screen(ctx, step).await,
        "readRegion" => handlers::vision_handlers::read_region(ctx, step).await,
        "clickImage" => handlers::vision_handlers::click_image(ctx, step).await,
        "waitImage" => handlers::vision_handlers::wait_image(ctx, step).await,

        other => Err(InterpError::invalid_argument(format!("unknown action: {other}"))),
    }
}

#[cfg(test)]
mod dispatch_test;

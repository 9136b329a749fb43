//! The UI Driver Facade (C1): a thin capability interface over element
//! finding, tapping, typing, screenshot, device buttons, pickers, and
//! alerts. Implementations are free to use whatever native facilities are
//! available on the host; their internals are not prescribed here (§4.7).

pub mod mock;

use crate::error::Result;
use crate::model::Rect;
use async_trait::async_trait;

/// Selector kind (§4.1, GLOSSARY).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    AccessibilityId,
    ClassChain,
    Predicate,
    Label,
    LabelContains,
    Value,
    ValueContains,
}

impl SelectorKind {
    /// Parse the `selectorType` step argument. `id` is an alias for
    /// `accessibilityId` (§4.1). Unknown strings default to
    /// `accessibilityId`, matching the field's documented default.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "accessibilityId" | "id" => Self::AccessibilityId,
            "classChain" => Self::ClassChain,
            "predicate" => Self::Predicate,
            "label" => Self::Label,
            "labelContains" => Self::LabelContains,
            "value" => Self::Value,
            "valueContains" => Self::ValueContains,
            _ => Self::AccessibilityId,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Foreground/background/not-running state reported by `state()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    NotRunning,
    Background,
    Foreground,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::NotRunning => "notRunning",
            AppState::Background => "background",
            AppState::Foreground => "foreground",
        }
    }
}

/// A raw captured frame; callers re-encode via `ImageCodec`.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Packed RGBA8 pixels, row-major.
    pub rgba: Vec<u8>,
}

/// One element handle, re-fetched on every query — never cached across
/// steps (§4.7, §9: "UI mutates").
#[async_trait]
pub trait ElementHandle: Send + Sync {
    async fn exists(&self) -> Result<bool>;
    async fn is_hittable(&self) -> Result<bool>;
    async fn is_enabled(&self) -> Result<bool>;
    async fn label(&self) -> Result<Option<String>>;
    async fn value(&self) -> Result<Option<String>>;
    async fn identifier(&self) -> Result<Option<String>>;
    async fn placeholder_value(&self) -> Result<Option<String>>;
    async fn frame(&self) -> Result<Rect>;

    async fn tap(&self) -> Result<()>;
    async fn double_tap(&self) -> Result<()>;
    async fn press_for_duration(&self, duration_secs: f64) -> Result<()>;
    async fn type_text(&self, text: &str) -> Result<()>;
    async fn clear_text(&self) -> Result<()>;
    async fn paste_text(&self) -> Result<()>;
    async fn adjust_picker_to(&self, value: &str) -> Result<()>;
    async fn picker_value(&self) -> Result<Option<String>>;

    async fn swipe(&self, direction: SwipeDirection) -> Result<()>;
    async fn scroll(&self, direction: SwipeDirection, distance: f64) -> Result<()>;
    async fn pinch(&self, scale: f64, velocity: f64) -> Result<()>;

    /// Descendant buttons of an alert/sheet container (§4.4 alert search).
    async fn buttons(&self) -> Result<Vec<Box<dyn ElementHandle>>>;
}

/// One application handle: either the springboard (home screen) or a
/// specific bundle, fetched fresh each step.
#[async_trait]
pub trait AppHandle: Send + Sync {
    fn bundle_id(&self) -> &str;

    async fn launch(
        &self,
        arguments: &[String],
        environment: &std::collections::HashMap<String, String>,
    ) -> Result<()>;
    async fn terminate(&self) -> Result<()>;
    async fn activate(&self) -> Result<()>;
    async fn state(&self) -> Result<AppState>;

    async fn find_one(
        &self,
        kind: SelectorKind,
        selector: &str,
    ) -> Result<Option<Box<dyn ElementHandle>>>;
    async fn find_many(
        &self,
        kind: SelectorKind,
        selector: &str,
        limit: usize,
    ) -> Result<Vec<Box<dyn ElementHandle>>>;

    /// A typed query restricted to one `ACCESSIBILITY_ID_SHORTCUTS`
    /// element-type, used by the Selector Resolver's ordered probe
    /// (§4.1 step 1) before it falls back to the generic
    /// `identifier == S OR label == S` query via `find_one`.
    async fn find_by_shortcut(
        &self,
        element_type: &str,
        identifier: &str,
    ) -> Result<Option<Box<dyn ElementHandle>>>;

    /// Top-level buttons, used by the `handleAlert` search order (§4.4).
    async fn buttons(&self) -> Result<Vec<Box<dyn ElementHandle>>>;
    /// Active alert containers, most recent first.
    async fn alerts(&self) -> Result<Vec<Box<dyn ElementHandle>>>;
    /// Active action-sheet containers, most recent first.
    async fn sheets(&self) -> Result<Vec<Box<dyn ElementHandle>>>;
}

/// The narrow capability set the interpreter depends on (§4.7).
#[async_trait]
pub trait UiDriver: Send + Sync {
    async fn active_app(&self) -> Result<Box<dyn AppHandle>>;
    async fn app_by_bundle(&self, bundle_id: &str) -> Result<Box<dyn AppHandle>>;
    /// The home-screen (springboard) app, used by alert search (§4.4).
    async fn springboard(&self) -> Result<Box<dyn AppHandle>>;

    async fn press_home(&self) -> Result<()>;
    async fn lock(&self) -> Result<()>;
    async fn unlock(&self) -> Result<()>;
    async fn capture_screenshot(&self) -> Result<Frame>;
    async fn set_pasteboard(&self, text: &str) -> Result<()>;

    async fn tap_xy(&self, x: f64, y: f64) -> Result<()>;
    async fn double_tap_xy(&self, x: f64, y: f64) -> Result<()>;
    async fn press_xy(&self, x: f64, y: f64, duration_secs: f64) -> Result<()>;
    async fn press_then_drag_to(
        &self,
        x: f64,
        y: f64,
        to_x: f64,
        to_y: f64,
        duration_secs: f64,
    ) -> Result<()>;

    /// Two-finger pinch centered on `(x, y)`, used when `pinch` (§4.2) is
    /// given no selector to anchor on.
    async fn pinch_xy(&self, x: f64, y: f64, scale: f64, velocity: f64) -> Result<()>;
}

#[cfg(test)]
mod driver_test;

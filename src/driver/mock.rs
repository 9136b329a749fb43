//! An in-memory `UiDriver` used by `cargo test` and by `tapflowd run` when
//! no native backend is configured. Scripts register elements and,
//! optionally, a tap effect (another element's label changes) so that
//! end-to-end scenarios can be exercised deterministically.

use super::{AppHandle, AppState, ElementHandle, Frame, SelectorKind, SwipeDirection, UiDriver};
use crate::error::{InterpError, Result};
use crate::model::Rect;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MockElementSpec {
    pub identifier: String,
    pub category: &'static str, // one of ACCESSIBILITY_ID_SHORTCUTS, singular form not required
    pub label: Option<String>,
    pub value: Option<String>,
    pub rect: Rect,
    pub hittable: bool,
    pub enabled: bool,
}

impl MockElementSpec {
    pub fn button(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            category: "buttons",
            label: Some(identifier.to_string()),
            value: None,
            rect: Rect { x: 0.0, y: 0.0, width: 100.0, height: 40.0 },
            hittable: true,
            enabled: true,
        }
    }

    pub fn static_text(identifier: &str, label: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            category: "staticTexts",
            label: Some(label.to_string()),
            value: None,
            rect: Rect { x: 0.0, y: 0.0, width: 100.0, height: 20.0 },
            hittable: true,
            enabled: true,
        }
    }
}

#[derive(Default)]
struct World {
    apps: HashMap<String, AppState>,
    /// identifier -> live element state (mutable label/value).
    elements: HashMap<String, MockElementSpec>,
    /// identifier of tapped element -> (identifier to mutate, new label).
    tap_effects: HashMap<String, (String, String)>,
    alerts: Vec<String>,
    sheets: Vec<String>,
}

pub struct MockDriver {
    world: Arc<RwLock<World>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self { world: Arc::new(RwLock::new(World::default())) }
    }

    pub fn register_element(&self, spec: MockElementSpec) {
        self.world.write().elements.insert(spec.identifier.clone(), spec);
    }

    /// Tapping `from` sets `to`'s label to `new_label`. Models scenario
    /// S1's "Go" click changing "Status" to "OK".
    pub fn on_tap_set_label(&self, from: &str, to: &str, new_label: &str) {
        self.world
            .write()
            .tap_effects
            .insert(from.to_string(), (to.to_string(), new_label.to_string()));
    }

    pub fn set_app_state(&self, bundle_id: &str, state: AppState) {
        self.world.write().apps.insert(bundle_id.to_string(), state);
    }

    pub fn push_alert(&self, button_identifier: &str) {
        self.world.write().alerts.push(button_identifier.to_string());
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

struct MockElement {
    world: Arc<RwLock<World>>,
    identifier: String,
}

fn matches_category(spec: &MockElementSpec, kind: SelectorKind, selector: &str) -> bool {
    match kind {
        SelectorKind::AccessibilityId => spec.identifier == selector,
        SelectorKind::Label => spec.label.as_deref() == Some(selector),
        SelectorKind::LabelContains => spec
            .label
            .as_deref()
            .is_some_and(|l| l.contains(selector)),
        SelectorKind::Value => spec.value.as_deref() == Some(selector),
        SelectorKind::ValueContains => spec
            .value
            .as_deref()
            .is_some_and(|v| v.contains(selector)),
        // classChain/predicate are opaque to the mock; fall back to an
        // identifier-or-label match, mirroring the generic fallback query
        // the real resolver uses for accessibilityId (§4.1).
        SelectorKind::ClassChain | SelectorKind::Predicate => {
            spec.identifier == selector || spec.label.as_deref() == Some(selector)
        }
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    async fn exists(&self) -> Result<bool> {
        Ok(self.world.read().elements.contains_key(&self.identifier))
    }

    async fn is_hittable(&self) -> Result<bool> {
        Ok(self
            .world
            .read()
            .elements
            .get(&self.identifier)
            .map(|e| e.hittable)
            .unwrap_or(false))
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self
            .world
            .read()
            .elements
            .get(&self.identifier)
            .map(|e| e.enabled)
            .unwrap_or(false))
    }

    async fn label(&self) -> Result<Option<String>> {
        Ok(self
            .world
            .read()
            .elements
            .get(&self.identifier)
            .and_then(|e| e.label.clone()))
    }

    async fn value(&self) -> Result<Option<String>> {
        Ok(self
            .world
            .read()
            .elements
            .get(&self.identifier)
            .and_then(|e| e.value.clone()))
    }

    async fn identifier(&self) -> Result<Option<String>> {
        Ok(Some(self.identifier.clone()))
    }

    async fn placeholder_value(&self) -> Result<Option<String>> {
        Ok(None)
    }

    async fn frame(&self) -> Result<Rect> {
        self.world
            .read()
            .elements
            .get(&self.identifier)
            .map(|e| e.rect)
            .ok_or_else(|| InterpError::not_found(format!("element {} gone", self.identifier)))
    }

    async fn tap(&self) -> Result<()> {
        let mut world = self.world.write();
        if let Some((target, new_label)) = world.tap_effects.get(&self.identifier).cloned() {
            if let Some(target_spec) = world.elements.get_mut(&target) {
                target_spec.label = Some(new_label);
            }
        }
        Ok(())
    }

    async fn double_tap(&self) -> Result<()> {
        self.tap().await
    }

    async fn press_for_duration(&self, _duration_secs: f64) -> Result<()> {
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        if let Some(spec) = self.world.write().elements.get_mut(&self.identifier) {
            spec.value = Some(text.to_string());
        }
        Ok(())
    }

    async fn clear_text(&self) -> Result<()> {
        if let Some(spec) = self.world.write().elements.get_mut(&self.identifier) {
            spec.value = None;
        }
        Ok(())
    }

    async fn paste_text(&self) -> Result<()> {
        Ok(())
    }

    async fn adjust_picker_to(&self, value: &str) -> Result<()> {
        if let Some(spec) = self.world.write().elements.get_mut(&self.identifier) {
            spec.value = Some(value.to_string());
        }
        Ok(())
    }

    async fn picker_value(&self) -> Result<Option<String>> {
        self.value().await
    }

    async fn swipe(&self, _direction: SwipeDirection) -> Result<()> {
        Ok(())
    }

    async fn scroll(&self, _direction: SwipeDirection, _distance: f64) -> Result<()> {
        Ok(())
    }

    async fn pinch(&self, _scale: f64, _velocity: f64) -> Result<()> {
        Ok(())
    }

    async fn buttons(&self) -> Result<Vec<Box<dyn ElementHandle>>> {
        // alert/sheet containers in the mock are identified by a naming
        // convention: an alert's "buttons" are any registered button
        // whose identifier was pushed via `push_alert`.
        let world = self.world.read();
        let ids: Vec<String> = world.alerts.clone();
        drop(world);
        Ok(ids
            .into_iter()
            .map(|id| {
                Box::new(MockElement { world: self.world.clone(), identifier: id })
                    as Box<dyn ElementHandle>
            })
            .collect())
    }
}

struct MockApp {
    world: Arc<RwLock<World>>,
    bundle_id: String,
    is_springboard: bool,
}

#[async_trait]
impl AppHandle for MockApp {
    fn bundle_id(&self) -> &str {
        &self.bundle_id
    }

    async fn launch(
        &self,
        _arguments: &[String],
        _environment: &HashMap<String, String>,
    ) -> Result<()> {
        self.world
            .write()
            .apps
            .insert(self.bundle_id.clone(), AppState::Foreground);
        Ok(())
    }

    async fn terminate(&self) -> Result<()> {
        self.world
            .write()
            .apps
            .insert(self.bundle_id.clone(), AppState::NotRunning);
        Ok(())
    }

    async fn activate(&self) -> Result<()> {
        self.world
            .write()
            .apps
            .insert(self.bundle_id.clone(), AppState::Foreground);
        Ok(())
    }

    async fn state(&self) -> Result<AppState> {
        Ok(self
            .world
            .read()
            .apps
            .get(&self.bundle_id)
            .copied()
            .unwrap_or(AppState::NotRunning))
    }

    async fn find_one(
        &self,
        kind: SelectorKind,
        selector: &str,
    ) -> Result<Option<Box<dyn ElementHandle>>> {
        let world = self.world.read();
        let found = world
            .elements
            .values()
            .find(|e| matches_category(e, kind, selector))
            .map(|e| e.identifier.clone());
        drop(world);
        Ok(found.map(|id| {
            Box::new(MockElement { world: self.world.clone(), identifier: id }) as Box<dyn ElementHandle>
        }))
    }

    async fn find_many(
        &self,
        kind: SelectorKind,
        selector: &str,
        limit: usize,
    ) -> Result<Vec<Box<dyn ElementHandle>>> {
        let world = self.world.read();
        let mut ids: Vec<String> = world
            .elements
            .values()
            .filter(|e| matches_category(e, kind, selector))
            .map(|e| e.identifier.clone())
            .collect();
        ids.sort();
        if limit > 0 {
            ids.truncate(limit);
        }
        drop(world);
        Ok(ids
            .into_iter()
            .map(|id| {
                Box::new(MockElement { world: self.world.clone(), identifier: id })
                    as Box<dyn ElementHandle>
            })
            .collect())
    }

    async fn find_by_shortcut(
        &self,
        element_type: &str,
        identifier: &str,
    ) -> Result<Option<Box<dyn ElementHandle>>> {
        let world = self.world.read();
        let found = world
            .elements
            .values()
            .find(|e| e.category == element_type && e.identifier == identifier)
            .map(|e| e.identifier.clone());
        drop(world);
        Ok(found.map(|id| {
            Box::new(MockElement { world: self.world.clone(), identifier: id }) as Box<dyn ElementHandle>
        }))
    }

    async fn buttons(&self) -> Result<Vec<Box<dyn ElementHandle>>> {
        self.find_many(SelectorKind::AccessibilityId, "", 0).await.map(|_| {
            let world = self.world.read();
            world
                .elements
                .values()
                .filter(|e| e.category == "buttons")
                .map(|e| e.identifier.clone())
                .map(|id| {
                    Box::new(MockElement { world: self.world.clone(), identifier: id })
                        as Box<dyn ElementHandle>
                })
                .collect()
        })
    }

    async fn alerts(&self) -> Result<Vec<Box<dyn ElementHandle>>> {
        if self.is_springboard || !self.world.read().alerts.is_empty() {
            Ok(vec![Box::new(MockElement {
                world: self.world.clone(),
                identifier: "__alert__".to_string(),
            })])
        } else {
            Ok(vec![])
        }
    }

    async fn sheets(&self) -> Result<Vec<Box<dyn ElementHandle>>> {
        Ok(vec![])
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn active_app(&self) -> Result<Box<dyn AppHandle>> {
        Ok(Box::new(MockApp {
            world: self.world.clone(),
            bundle_id: "active".to_string(),
            is_springboard: false,
        }))
    }

    async fn app_by_bundle(&self, bundle_id: &str) -> Result<Box<dyn AppHandle>> {
        Ok(Box::new(MockApp {
            world: self.world.clone(),
            bundle_id: bundle_id.to_string(),
            is_springboard: false,
        }))
    }

    async fn springboard(&self) -> Result<Box<dyn AppHandle>> {
        Ok(Box::new(MockApp {
            world: self.world.clone(),
            bundle_id: "com.apple.springboard".to_string(),
            is_springboard: true,
        }))
    }

    async fn press_home(&self) -> Result<()> {
        Ok(())
    }

    async fn lock(&self) -> Result<()> {
        Ok(())
    }

    async fn unlock(&self) -> Result<()> {
        Ok(())
    }

    async fn capture_screenshot(&self) -> Result<Frame> {
        Ok(Frame { width: 2, height: 2, rgba: vec![255; 2 * 2 * 4] })
    }

    async fn set_pasteboard(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn tap_xy(&self, _x: f64, _y: f64) -> Result<()> {
        Ok(())
    }

    async fn double_tap_xy(&self, _x: f64, _y: f64) -> Result<()> {
        Ok(())
    }

    async fn press_xy(&self, _x: f64, _y: f64, _duration_secs: f64) -> Result<()> {
        Ok(())
    }

    async fn press_then_drag_to(
        &self,
        _x: f64,
        _y: f64,
        _to_x: f64,
        _to_y: f64,
        _duration_secs: f64,
    ) -> Result<()> {
        Ok(())
    }

    async fn pinch_xy(&self, _x: f64, _y: f64, _scale: f64, _velocity: f64) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod mock_test;

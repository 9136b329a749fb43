//! Signal State and the per-execution context threaded through every step.
//!
//! A Value Store, Signal State, and Element Cache exist only for the
//! duration of one execution and are never shared across concurrent
//! executions (§3 Lifecycle).

use crate::config::LimitsConfig;
use crate::driver::UiDriver;
use crate::event::EventSink;
use crate::model::ElementDescriptor;
use crate::value::ValueStore;
use crate::vision::VisionFacade;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Two one-shot booleans observed at step and loop boundaries to unwind
/// control flow without exceptions (§3, §9 Design Notes).
#[derive(Default)]
pub struct SignalState {
    should_break: AtomicBool,
    should_stop: AtomicBool,
}

impl SignalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_break(&self) {
        self.should_break.store(true, Ordering::SeqCst);
    }

    /// Consume and clear the break signal (the loop it unwinds through
    /// clears it once observed; §3).
    pub fn take_break(&self) -> bool {
        self.should_break.swap(false, Ordering::SeqCst)
    }

    pub fn is_break_set(&self) -> bool {
        self.should_break.load(Ordering::SeqCst)
    }

    pub fn set_stop(&self) {
        self.should_stop.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_set(&self) -> bool {
        self.should_stop.load(Ordering::SeqCst)
    }
}

/// Everything a primitive handler or the control-flow engine needs for one
/// script execution: value store, signals, element cache, and the shared,
/// process-global UI Driver / Vision facades (§3 Lifecycle).
pub struct ExecutionContext {
    pub store: ValueStore,
    pub signals: SignalState,
    pub driver: Arc<dyn UiDriver>,
    pub vision: Arc<dyn VisionFacade>,
    pub sink: Arc<dyn EventSink>,
    pub limits: LimitsConfig,
    /// The bundle id of the "current app" set by the last successful
    /// `launch`/`activate`. Never an element/app handle — those are
    /// re-fetched every step (§9).
    pub current_bundle_id: RwLock<Option<String>>,
    /// Populated by `findElements`, consumed by `forEach` (§3 Element
    /// Cache).
    pub element_cache: RwLock<Vec<ElementDescriptor>>,
    /// Monotonic counter assigning each emitted `step_start`/`step_complete`
    /// pair a stable index, independent of control-flow nesting depth.
    step_counter: AtomicUsize,
}

impl ExecutionContext {
    pub fn new(
        driver: Arc<dyn UiDriver>,
        vision: Arc<dyn VisionFacade>,
        sink: Arc<dyn EventSink>,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            store: ValueStore::new(),
            signals: SignalState::new(),
            driver,
            vision,
            sink,
            limits,
            current_bundle_id: RwLock::new(None),
            element_cache: RwLock::new(Vec::new()),
            step_counter: AtomicUsize::new(0),
        }
    }

    /// Assign and return the next step index for event tagging.
    pub fn next_step_index(&self) -> usize {
        self.step_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// The index most recently assigned by `next_step_index`, or 0 if
    /// none yet (used to fill `stoppedAt` after the fact).
    pub fn last_step_index(&self) -> usize {
        self.step_counter.load(Ordering::SeqCst).saturating_sub(1)
    }

    pub fn set_current_bundle_id(&self, bundle_id: impl Into<String>) {
        *self.current_bundle_id.write() = Some(bundle_id.into());
    }

    pub fn current_bundle_id(&self) -> Option<String> {
        self.current_bundle_id.read().clone()
    }
}

#[cfg(test)]
mod context_test;

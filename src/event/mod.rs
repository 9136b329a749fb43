//! Pluggable lifecycle-event stream sink.
//!
//! The spec's "two overlapping command-registration variants" open
//! question (§9) is resolved in favor of the fuller semantics: events are
//! always emitted and interpolation is always applied, regardless of
//! which endpoint is in use. `NullSink` backs the blocking `/script`
//! endpoint (events are still constructed and dropped, not skipped);
//! `ChannelSink` backs `/script/stream`.

use crate::model::StepEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;

#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emit one event. The emitter MAY drop writes to a closed stream
    /// silently (§5 Cancellation) — this never fails the script.
    async fn emit(&self, event: StepEvent);
}

/// Used by the blocking `/script` endpoint: events are constructed (so
/// the same code path runs regardless of transport) but discarded.
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn emit(&self, _event: StepEvent) {}
}

/// Backs `/script/stream`: forwards events over an mpsc channel consumed
/// by the SSE response body.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StepEvent>,
}

impl ChannelSink {
    /// Returns the sink plus the receiving half for the SSE handler to
    /// wrap in a `tokio_stream`.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StepEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn emit(&self, event: StepEvent) {
        // A closed receiver (client disconnected) is not an execution
        // failure; drop the write silently (§5).
        let _ = self.tx.send(event);
    }
}

//! The interpreter engine: Value Store lifecycle, the Step Dispatcher
//! (C6), the Control-Flow Engine (C8), and the Executor / Event Emitter
//! (C9).

pub mod context;
pub mod control_flow;
pub mod dispatch;
pub mod interpreter;

pub use context::{ExecutionContext, SignalState};
pub use interpreter::{Interpreter, StepFailure};

//! tapflow - a JSON-over-HTTP interpreter for declarative UI-automation
//! scripts.
//!
//! A script is an ordered list of typed steps (tap, swipe, type, wait,
//! assert, vision-backed find/click, ...) run against a mobile UI-test
//! driver. This crate provides:
//! - An embedded interpreter: a Value Store, name resolution, control-flow
//!   signals (break/return), and a closed dispatch table of step opcodes
//! - An HTTP surface (`tapflowd`) that accepts a script, runs it to
//!   completion or streams step-by-step progress over SSE, and returns a
//!   structured terminal result
//! - A `UiDriver`/`VisionFacade` abstraction so the interpreter never talks
//!   to a concrete automation backend directly
//!
//! # Example
//!
//! ```rust,no_run
//! use tapflow::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     tapflow::http::serve(config).await?;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod constants;
pub mod error;
pub mod model;
pub mod value;

// Interpreter
pub mod codec;
pub mod engine;
pub mod handlers;
pub mod interpolate;
pub mod selector;

// Automation backends
pub mod driver;
pub mod vision;

// Infrastructure
pub mod config;
pub mod event;
pub mod http;
pub mod telemetry;

// Re-exports for convenience
pub use error::{InterpError, Result};
pub use model::{ScriptRequest, Step, TerminalResult};

/// Initialize structured logging for both the server and the one-shot CLI.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tapflow=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

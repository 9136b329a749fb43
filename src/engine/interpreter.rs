//! The Executor / Event Emitter (C9): drives a step list, emits
//! lifecycle events, tracks duration, and assembles the Terminal Result
//! (§4.6).

use super::context::ExecutionContext;
use super::{control_flow, dispatch};
use crate::config::LimitsConfig;
use crate::driver::UiDriver;
use crate::error::InterpError;
use crate::event::EventSink;
use crate::interpolate;
use crate::model::{Step, StepEvent, TerminalResult};
use crate::vision::VisionFacade;
use futures::future::BoxFuture;
use serde_json::Map;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Carries enough to assemble the Terminal Result's failure fields (§7).
#[derive(Debug, Clone)]
pub struct StepFailure {
    pub error: InterpError,
    pub failed_action: String,
    pub failed_step_id: Option<String>,
}

pub type StepListResult = std::result::Result<(), StepFailure>;

/// Run a list of steps in order, stopping early on a break/stop signal or
/// the first non-optional failure (§4.5, §4.6).
pub fn execute_steps<'a>(
    ctx: &'a ExecutionContext,
    steps: &'a [Step],
) -> BoxFuture<'a, StepListResult> {
    Box::pin(async move {
        for step in steps {
            if ctx.signals.is_stop_set() || ctx.signals.is_break_set() {
                break;
            }
            execute_one(ctx, step).await?;
        }
        Ok(())
    })
}

/// Execute one step: emit `step_start`, dispatch (recursing into
/// control-flow sub-lists as needed), emit `step_complete`, and swallow
/// the failure if the step is `optional` (§4.6, Testable Property 2).
fn execute_one<'a>(ctx: &'a ExecutionContext, step: &'a Step) -> BoxFuture<'a, StepListResult> {
    Box::pin(async move {
        let index = ctx.next_step_index();
        let started = now_ms();
        ctx.sink
            .emit(StepEvent::StepStart {
                timestamp_ms: started,
                index,
                action: step.action.clone(),
                step_id: step.id.clone(),
            })
            .await;

        let result = dispatch_one(ctx, step).await;
        let duration_ms = now_ms() - started;
        let (success, error_message) = match &result {
            Ok(()) => (true, None),
            Err(f) => (false, Some(f.error.message())),
        };
        crate::telemetry::record_step_execution(&step.action, if success { "ok" } else { "error" });
        ctx.sink
            .emit(StepEvent::StepComplete {
                timestamp_ms: now_ms(),
                index,
                action: step.action.clone(),
                success,
                duration_ms,
                error: error_message,
            })
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(failure) => {
                if step.optional {
                    tracing::debug!(action = %step.action, error = %failure.error, "optional step failed, continuing");
                    Ok(())
                } else {
                    Err(failure)
                }
            }
        }
    })
}

async fn dispatch_one(ctx: &ExecutionContext, step: &Step) -> StepListResult {
    let resolved_args = interpolate::interpolate_map(&step.args, &ctx.store);
    let mut resolved = step.clone();
    resolved.args = resolved_args;

    match step.action.as_str() {
        "if" => control_flow::exec_if(ctx, &resolved).await,
        "while" => control_flow::exec_while(ctx, &resolved).await,
        "repeat" => control_flow::exec_repeat(ctx, &resolved).await,
        "forEach" => control_flow::exec_for_each(ctx, &resolved).await,
        "try" => control_flow::exec_try(ctx, &resolved).await,
        "break" => {
            ctx.signals.set_break();
            Ok(())
        }
        "stop" => {
            ctx.signals.set_stop();
            Ok(())
        }
        "return" => {
            control_flow::exec_return(ctx, &resolved);
            Ok(())
        }
        action => dispatch::dispatch(ctx, action, &resolved).await.map_err(|error| StepFailure {
            error,
            failed_action: action.to_string(),
            failed_step_id: resolved.id.clone(),
        }),
    }
}

/// Top-level interpreter: owns the shared, process-global UI Driver and
/// Vision facades and runs one script per call against a fresh
/// `ExecutionContext` (§3 Lifecycle, §5 "Across executions").
pub struct Interpreter {
    driver: Arc<dyn UiDriver>,
    vision: Arc<dyn VisionFacade>,
    limits: LimitsConfig,
}

impl Interpreter {
    pub fn new(driver: Arc<dyn UiDriver>, vision: Arc<dyn VisionFacade>, limits: LimitsConfig) -> Self {
        Self { driver, vision, limits }
    }

    /// Run a script to completion, assembling the Terminal Result (§4.6).
    pub async fn run_script(
        &self,
        steps: &[Step],
        initial_variables: Option<&Map<String, serde_json::Value>>,
        sink: Arc<dyn EventSink>,
    ) -> TerminalResult {
        let ctx = ExecutionContext::new(
            self.driver.clone(),
            self.vision.clone(),
            sink.clone(),
            self.limits,
        );
        if let Some(vars) = initial_variables {
            ctx.store.seed(vars);
        }

        let started = now_ms();

        if steps.is_empty() {
            // Empty step list short-circuits to a trivial success result,
            // no events required (§4.6, Testable Properties "Boundary
            // behaviors").
            let (results, variables) = ctx.store.snapshot();
            return TerminalResult {
                success: true,
                results,
                variables,
                stopped_at: None,
                error: None,
                failed_action: None,
                failed_step_id: None,
                did_break: false,
                duration_ms: now_ms() - started,
            };
        }

        ctx.sink
            .emit(StepEvent::Start { timestamp_ms: started, total_steps: steps.len() })
            .await;

        let outcome = execute_steps(&ctx, steps).await;
        let duration_ms = now_ms() - started;
        let (results, variables) = ctx.store.snapshot();

        let terminal = match outcome {
            Ok(()) => {
                if ctx.signals.is_stop_set() {
                    TerminalResult {
                        success: false,
                        results,
                        variables,
                        stopped_at: Some(ctx.last_step_index()),
                        error: None,
                        failed_action: None,
                        failed_step_id: None,
                        did_break: false,
                        duration_ms,
                    }
                } else if ctx.signals.take_break() {
                    // A break caught unwound all the way to the top level
                    // (§4.6): success=true, stoppedAt=i, break=true.
                    TerminalResult {
                        success: true,
                        results,
                        variables,
                        stopped_at: Some(ctx.last_step_index()),
                        error: None,
                        failed_action: None,
                        failed_step_id: None,
                        did_break: true,
                        duration_ms,
                    }
                } else {
                    TerminalResult {
                        success: true,
                        results,
                        variables,
                        stopped_at: None,
                        error: None,
                        failed_action: None,
                        failed_step_id: None,
                        did_break: false,
                        duration_ms,
                    }
                }
            }
            Err(failure) => TerminalResult {
                success: false,
                results,
                variables,
                stopped_at: Some(ctx.last_step_index()),
                error: Some(failure.error.message()),
                failed_action: Some(failure.failed_action),
                failed_step_id: failure.failed_step_id,
                did_break: false,
                duration_ms,
            },
        };

        ctx.sink
            .emit(StepEvent::Done {
                timestamp_ms: now_ms(),
                success: terminal.success,
                duration_ms,
                stopped_at: terminal.stopped_at,
                error: terminal.error.clone(),
            })
            .await;

        terminal
    }
}

#[cfg(test)]
mod interpreter_test;

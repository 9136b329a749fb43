//! HTTP transport: `POST /script` (blocking), `POST /script/stream` (SSE),
//! plus the `/healthz` and `/metrics` system endpoints (§6, SPEC §11).

use crate::config::Config;
use crate::driver::mock::MockDriver;
use crate::engine::Interpreter;
use crate::error::{InterpError, Result};
use crate::event::{ChannelSink, NullSink};
use crate::model::{ScriptRequest, Step, TerminalResult};
use crate::vision::mock::MockVision;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde_json::{json, Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_stream::wrappers::UnboundedReceiverStream;

#[derive(Clone)]
pub struct AppState {
    interpreter: Arc<Interpreter>,
}

/// Maps transport-level failures (malformed body, bind errors) to an HTTP
/// response. Script-internal failures never surface here — they are
/// reported as `success:false` inside a 200 Terminal Result (§6).
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<InterpError> for AppError {
    fn from(err: InterpError) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: err.message() }
    }
}

/// Validate the request body against the exact malformed-body messages
/// spec.md §6 specifies, then decode it.
fn decode_script_request(body: &Bytes) -> std::result::Result<ScriptRequest, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(format!("invalid JSON body: {e}")))?;

    let steps = value
        .get("steps")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::bad_request("'steps' array is required"))?;
    for step in steps {
        if !step.is_object() {
            return Err(AppError::bad_request("Each step must be a dictionary"));
        }
    }
    if let Some(variables) = value.get("variables") {
        if !variables.is_object() && !variables.is_null() {
            return Err(AppError::bad_request("'variables' must be an object"));
        }
    }

    let decoded_steps: Vec<Step> = steps
        .iter()
        .cloned()
        .map(serde_json::from_value)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| AppError::bad_request(format!("invalid step: {e}")))?;
    let variables: Option<Map<String, Value>> = value
        .get("variables")
        .and_then(Value::as_object)
        .cloned();

    Ok(ScriptRequest { steps: decoded_steps, variables })
}

async fn script_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<TerminalResult>, AppError> {
    let request = decode_script_request(&body)?;
    let result = state
        .interpreter
        .run_script(&request.steps, request.variables.as_ref(), Arc::new(NullSink))
        .await;
    crate::telemetry::record_script_request(if result.success { "ok" } else { "error" });
    crate::telemetry::record_script_duration(
        if result.success { "ok" } else { "error" },
        result.duration_ms as f64 / 1000.0,
    );
    Ok(Json(result))
}

fn to_sse_event<T: serde::Serialize>(value: &T) -> Event {
    Event::default().json_data(value).unwrap_or_else(|_| Event::default().data("{}"))
}

async fn script_stream_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Sse<impl Stream<Item = std::result::Result<Event, std::convert::Infallible>>>, AppError>
{
    let request = decode_script_request(&body)?;
    let (sink, rx) = ChannelSink::new();
    let interpreter = state.interpreter.clone();
    let (result_tx, result_rx) = tokio::sync::oneshot::channel();

    tokio::spawn(async move {
        let result = interpreter
            .run_script(&request.steps, request.variables.as_ref(), Arc::new(sink))
            .await;
        crate::telemetry::record_script_request(if result.success { "ok" } else { "error" });
        crate::telemetry::record_script_duration(
            if result.success { "ok" } else { "error" },
            result.duration_ms as f64 / 1000.0,
        );
        let _ = result_tx.send(result);
    });

    let events = UnboundedReceiverStream::new(rx).map(|event| Ok(to_sse_event(&event)));
    let terminal = futures::stream::once(async move {
        match result_rx.await {
            Ok(result) => Ok(to_sse_event(&result)),
            Err(_) => Ok(Event::default().data("{}")),
        }
    });

    Ok(Sse::new(events.chain(terminal)))
}

async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn metrics_handler() -> std::result::Result<(StatusCode, String), AppError> {
    let metrics = crate::telemetry::metrics_text()?;
    Ok((StatusCode::OK, metrics))
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/script", post(script_handler))
        .route("/script/stream", post(script_stream_handler))
        .route("/healthz", get(healthz_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Start the HTTP server, blocking until it shuts down.
pub async fn serve(config: Config) -> Result<()> {
    crate::telemetry::init("tapflow");

    let interpreter = Arc::new(Interpreter::new(
        Arc::new(MockDriver::new()),
        Arc::new(MockVision::new()),
        config.limits,
    ));
    let state = AppState { interpreter };
    let app = build_router(state);

    let addr = format!("{}:{}", config.http.host, config.http.port);
    let socket_addr: SocketAddr =
        addr.parse().map_err(|e| InterpError::unknown(format!("invalid address {addr}: {e}")))?;

    tracing::info!("starting HTTP server on {socket_addr}");
    let listener = tokio::net::TcpListener::bind(socket_addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| InterpError::unknown(format!("server error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod http_test;

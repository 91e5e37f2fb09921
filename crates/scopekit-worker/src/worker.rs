//! Background scope worker and per-frame fan-out.
//!
//! `ScopeWorker` owns one task that drains a bounded request channel and
//! runs each request to completion on the blocking pool before taking the
//! next. `analyze_frame` is the other shape: several scopes over one frame,
//! one blocking task each, sharing the frame read-only through an `Arc`.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use scopekit_core::{
    ScopeEngine, ScopeError, ScopeImage, ScopeKind, ScopeOptions, ScopeOutput, ScopeResult,
};

use crate::config::WorkerConfig;
use crate::protocol::{ScopeRequest, ScopeResponse};

struct Job {
    request: ScopeRequest,
    reply: oneshot::Sender<ScopeResponse>,
}

/// Handle to a running scope worker. Cheap to clone; the worker stops once
/// every handle is dropped and the queue is drained.
#[derive(Clone)]
pub struct ScopeWorker {
    tx: mpsc::Sender<Job>,
}

impl ScopeWorker {
    /// Start the worker on the current tokio runtime.
    ///
    /// Returns the handle and the worker task, which finishes after the last
    /// handle is dropped.
    pub fn spawn(config: &WorkerConfig) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.queue_depth);
        let defaults = config.scope_options();
        let task = tokio::spawn(run(rx, defaults));
        (Self { tx }, task)
    }

    /// Queue a request and wait for its response.
    ///
    /// Never fails: a worker that has gone away is reported as an error
    /// response. Dropping the returned future discards the result.
    pub async fn submit(&self, request: ScopeRequest) -> ScopeResponse {
        let (reply, response) = oneshot::channel();
        if self.tx.send(Job { request, reply }).await.is_err() {
            return worker_gone();
        }
        response.await.unwrap_or_else(|_| worker_gone())
    }

    /// Parse one JSON request and submit it. Unparseable input becomes an
    /// error response.
    pub async fn submit_json(&self, line: &str) -> ScopeResponse {
        match serde_json::from_str::<ScopeRequest>(line) {
            Ok(request) => self.submit(request).await,
            Err(e) => {
                tracing::warn!("Failed to parse scope request: {e}");
                ScopeResponse::invalid_request(&e)
            }
        }
    }
}

async fn run(mut rx: mpsc::Receiver<Job>, defaults: ScopeOptions) {
    tracing::info!(
        waveform = %defaults.waveform,
        vectorscope = %defaults.vectorscope,
        "scope worker started"
    );

    while let Some(Job { request, reply }) = rx.recv().await {
        let response = match tokio::task::spawn_blocking(move || request.respond(defaults)).await {
            Ok(response) => response,
            Err(e) => ScopeResponse::from_error(&ScopeError::ComputationFault(format!(
                "scope task failed: {e}"
            ))),
        };
        // Caller may have stopped waiting.
        let _ = reply.send(response);
    }

    tracing::info!("scope worker stopped");
}

fn worker_gone() -> ScopeResponse {
    ScopeResponse::from_error(&ScopeError::ComputationFault(
        "scope worker has shut down".to_string(),
    ))
}

/// Compute several scopes of one frame in parallel.
///
/// Results come back in the order of `kinds`. Each scope succeeds or fails
/// on its own.
pub async fn analyze_frame(
    image: Arc<ScopeImage>,
    kinds: &[ScopeKind],
    options: ScopeOptions,
) -> Vec<ScopeResult<ScopeOutput>> {
    let engine = ScopeEngine::new(options);

    let tasks = kinds.iter().map(|&kind| {
        let image = Arc::clone(&image);
        tokio::task::spawn_blocking(move || engine.compute(&image, kind))
    });

    join_all(tasks)
        .await
        .into_iter()
        .map(|joined| {
            joined.unwrap_or_else(|e| {
                Err(ScopeError::ComputationFault(format!("scope task failed: {e}")))
            })
        })
        .collect()
}

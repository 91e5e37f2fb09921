//! Scope worker binary.
//!
//! Reads one JSON scope request per line on stdin and writes one JSON
//! response per line on stdout. Logs go to stderr (`RUST_LOG`, default
//! `info`).

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use scopekit_worker::{ScopeWorker, WorkerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = WorkerConfig::default();
    tracing::info!(
        queue_depth = config.queue_depth,
        "scopekit-worker reading requests from stdin"
    );

    let (worker, task) = ScopeWorker::spawn(&config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = worker.submit_json(&line).await;
        let mut json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize ScopeResponse: {e}");
                continue;
            }
        };
        json.push('\n');

        if let Err(e) = stdout.write_all(json.as_bytes()).await {
            tracing::error!("Failed to write stdout: {e}");
            break;
        }
        if let Err(e) = stdout.flush().await {
            tracing::error!("Failed to flush stdout: {e}");
            break;
        }
    }

    drop(worker);
    let _ = task.await;
}

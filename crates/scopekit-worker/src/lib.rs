//! Scopekit Worker: request/response dispatch for scope computation.
//!
//! Wraps `scopekit-core` in the wire contract callers speak (JSON requests
//! carrying a base64 RGBA frame and a scope type) and runs requests on a
//! background worker fed over a `tokio` channel.

pub mod config;
pub mod protocol;
pub mod worker;

pub use config::WorkerConfig;
pub use protocol::{ScopeRequest, ScopeResponse, WireImage};
pub use worker::{ScopeWorker, analyze_frame};

//! Scopekit Core: pixel reductions behind video scopes.
//!
//! This crate turns an 8-bit RGBA frame into the accumulation grids used by
//! histogram, waveform/parade and vectorscope displays. Pure computation:
//! no I/O, no threads, no rendering.

pub mod color;
pub mod engine;
pub mod error;
pub mod image;
pub mod scopes;

// Re-exports for convenience.
pub use engine::{ScopeEngine, ScopeKind, ScopeOptions, ScopeOutput, WaveformMode};
pub use error::{ScopeError, ScopeResult};
pub use crate::image::ScopeImage;
pub use scopes::VectorscopePolicy;

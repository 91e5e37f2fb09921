//! Scope computation: histogram, luma waveform, RGB parade and vectorscope.
//!
//! Every scope is a single pass over the frame into a fixed-size, row-major
//! `u32` grid created for that call.

pub mod histogram;
pub mod parade;
pub mod vectorscope;
pub mod waveform;

pub use histogram::HistogramData;
pub use parade::ParadeData;
pub use vectorscope::{VectorscopeData, VectorscopePolicy};
pub use waveform::WaveformData;

/// Number of code values in an 8-bit channel; bins per histogram channel and
/// rows per waveform.
pub const LEVELS: usize = 256;

/// Row of a waveform grid holding `level`. Row 0 is the brightest level.
#[inline]
pub(crate) fn level_row(level: u8) -> usize {
    LEVELS - 1 - level as usize
}

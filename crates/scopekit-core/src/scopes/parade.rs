//! RGB parade scope computation.
//!
//! Generates separate waveforms for R, G, B channels displayed side by side.
//! Each channel's waveform shows intensity distribution vs. horizontal position.

use serde::{Deserialize, Serialize};

use super::{LEVELS, level_row};
use crate::image::ScopeImage;

/// Parade scope data: separate waveforms for R, G, B channels side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParadeData {
    /// Width of each channel's waveform display.
    pub width: u32,
    /// Height of each channel's waveform display.
    pub height: u32,
    /// Red channel density data (width × height, row-major).
    pub r: Vec<u32>,
    /// Green channel density data (width × height, row-major).
    pub g: Vec<u32>,
    /// Blue channel density data (width × height, row-major).
    pub b: Vec<u32>,
}

/// Compute parade from a frame.
///
/// Each channel gets its own waveform plot where x = source column
/// and y = that channel's code value, brightest on row 0. Samples are
/// already 0–255 so no level can fall outside the grid.
pub fn compute(image: &ScopeImage) -> ParadeData {
    let width = image.width() as usize;
    let total = width * LEVELS;

    let mut r = vec![0u32; total];
    let mut g = vec![0u32; total];
    let mut b = vec![0u32; total];

    for row in image.rows() {
        for (x, px) in row.iter().enumerate() {
            r[level_row(px[0]) * width + x] += 1;
            g[level_row(px[1]) * width + x] += 1;
            b[level_row(px[2]) * width + x] += 1;
        }
    }

    ParadeData {
        width: image.width(),
        height: LEVELS as u32,
        r,
        g,
        b,
    }
}

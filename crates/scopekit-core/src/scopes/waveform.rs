//! Luma waveform scope computation.
//!
//! x = source column, y = Rec.709 luma level, with the brightest level on
//! row 0 so the grid can be blitted top-down.

use serde::{Deserialize, Serialize};

use super::{LEVELS, level_row};
use crate::color::{LumaWeights, round_half_up};
use crate::image::ScopeImage;

/// Waveform scope data: plots pixel luma vs. horizontal position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveformData {
    /// Width of the waveform display in columns (= image width).
    pub width: u32,
    /// Height of the waveform display in rows (always 256).
    pub height: u32,
    /// Density data (width × height, row-major).
    pub density: Vec<u32>,
}

impl WaveformData {
    /// Count at column `x` for luma `level`.
    pub fn at(&self, x: u32, level: u8) -> u32 {
        self.density[level_row(level) * self.width as usize + x as usize]
    }
}

/// Quantise a pixel to its Rec.709 luma level.
///
/// Returns `None` if coefficient error ever pushes the level outside 0–255.
#[inline]
pub fn luma_level(r: u8, g: u8, b: u8) -> Option<u8> {
    let level = round_half_up(LumaWeights::REC709.luma(r, g, b));
    if (0.0..=255.0).contains(&level) {
        Some(level as u8)
    } else {
        None
    }
}

/// Compute the luma waveform of a frame.
pub fn compute(image: &ScopeImage) -> WaveformData {
    let width = image.width() as usize;
    let mut density = vec![0u32; width * LEVELS];

    for row in image.rows() {
        for (x, &[r, g, b, _]) in row.iter().enumerate() {
            if let Some(level) = luma_level(r, g, b) {
                density[level_row(level) * width + x] += 1;
            }
        }
    }

    WaveformData {
        width: image.width(),
        height: LEVELS as u32,
        density,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_pixel_lands_on_top_row() {
        let image = ScopeImage::new(1, 1, vec![255, 255, 255, 255]).unwrap();
        let wf = compute(&image);
        assert_eq!(wf.width, 1);
        assert_eq!(wf.height, 256);
        assert_eq!(wf.density[0], 1);
        assert_eq!(wf.density.iter().sum::<u32>(), 1);
    }

    #[test]
    fn test_black_pixel_lands_on_bottom_row() {
        let image = ScopeImage::new(1, 1, vec![0, 0, 0, 255]).unwrap();
        let wf = compute(&image);
        assert_eq!(wf.density[255], 1);
        assert_eq!(wf.at(0, 0), 1);
    }

    #[test]
    fn test_columns_follow_source_x() {
        // Row of three: black, gray, white.
        let bytes = vec![0, 0, 0, 255, 128, 128, 128, 255, 255, 255, 255, 255];
        let wf = compute(&ScopeImage::new(3, 1, bytes).unwrap());
        assert_eq!(wf.at(0, 0), 1);
        assert_eq!(wf.at(1, 128), 1);
        assert_eq!(wf.at(2, 255), 1);
        assert_eq!(wf.density.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_luma_level_uses_rec709_weights() {
        // 0.7152 * 255 = 182.376
        assert_eq!(luma_level(0, 255, 0), Some(182));
        // 0.2126 * 255 = 54.213
        assert_eq!(luma_level(255, 0, 0), Some(54));
        // 0.0722 * 255 = 18.411
        assert_eq!(luma_level(0, 0, 255), Some(18));
    }

    #[test]
    fn test_luma_level_never_exceeds_range() {
        for v in 0..=255u8 {
            assert_eq!(luma_level(v, v, v), Some(v));
        }
    }
}

//! Per-channel RGB histogram.

use serde::{Deserialize, Serialize};

use super::LEVELS;
use crate::image::ScopeImage;

/// Histogram data for R, G, B channels (256 bins each, index = code value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramData {
    pub r: Vec<u32>,
    pub g: Vec<u32>,
    pub b: Vec<u32>,
}

impl HistogramData {
    fn empty() -> Self {
        Self {
            r: vec![0; LEVELS],
            g: vec![0; LEVELS],
            b: vec![0; LEVELS],
        }
    }

    /// Peak bin value across all channels (for normalization).
    pub fn peak(&self) -> u32 {
        [&self.r, &self.g, &self.b]
            .into_iter()
            .flat_map(|ch| ch.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Compute histogram from a frame.
pub fn compute(image: &ScopeImage) -> HistogramData {
    let mut hist = HistogramData::empty();
    for &[r, g, b, _] in image.pixels() {
        hist.r[r as usize] += 1;
        hist.g[g as usize] += 1;
        hist.b[b as usize] += 1;
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, px: [u8; 4]) -> ScopeImage {
        let bytes = px.repeat((width * height) as usize);
        ScopeImage::new(width, height, bytes).unwrap()
    }

    #[test]
    fn test_histogram_monochrome_single_bin() {
        let hist = compute(&uniform(2, 2, [128, 128, 128, 255]));
        for ch in [&hist.r, &hist.g, &hist.b] {
            assert_eq!(ch.len(), LEVELS);
            assert_eq!(ch[128], 4);
            assert_eq!(ch.iter().sum::<u32>(), 4);
        }
        assert_eq!(hist.peak(), 4);
    }

    #[test]
    fn test_histogram_channels_are_independent() {
        let bytes = vec![255, 0, 10, 0, 0, 255, 10, 99];
        let hist = compute(&ScopeImage::new(2, 1, bytes).unwrap());
        assert_eq!(hist.r[255], 1);
        assert_eq!(hist.r[0], 1);
        assert_eq!(hist.g[0], 1);
        assert_eq!(hist.g[255], 1);
        assert_eq!(hist.b[10], 2);
    }

    #[test]
    fn test_histogram_ignores_alpha() {
        let opaque = compute(&uniform(3, 3, [1, 2, 3, 255]));
        let clear = compute(&uniform(3, 3, [1, 2, 3, 0]));
        assert_eq!(opaque, clear);
    }
}

//! Vectorscope (chrominance) scope computation.
//!
//! Projects each pixel's colour-difference components onto a fixed
//! 256 × 256 grid whose centre is the achromatic point. Two coordinate
//! mappings are in use by scope consumers and they plot the same frame
//! differently, so both are kept as explicit policies:
//!
//! ```text
//!   Rec709Yuv     Y = .2126R + .7152G + .0722B
//!                 U = (B − Y) × 0.5389        V = (R − Y) × 0.6350
//!                 x = round(V/128 × 128 + 128)
//!                 y = round(−U/128 × 128 + 128)      (U axis points up)
//!
//!   SimpleChroma  Y = .299R + .587G + .114B
//!                 U = round(B − Y)            V = round(R − Y)
//!                 x = floor(U × 128/255 + 128)
//!                 y = floor(V × 128/255 + 128)
//! ```
//!
//! Pixels whose cell falls outside the grid are dropped, never clamped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{LumaWeights, round_half_up};
use crate::error::ScopeError;
use crate::image::ScopeImage;

/// Side length of the square vectorscope grid.
pub const SIZE: usize = 256;

const HALF: f64 = (SIZE / 2) as f64;

/// Rec.709 YUV scale factors for the colour-difference signals.
const U_SCALE: f64 = 0.5389;
const V_SCALE: f64 = 0.6350;

/// Coordinate mapping from RGB to a vectorscope cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VectorscopePolicy {
    /// Rec.709 luma with scaled U/V; x = V, y = −U.
    #[default]
    #[serde(rename = "rec709")]
    Rec709Yuv,
    /// Rec.601 luma with unscaled, rounded differences; x = U, y = V.
    #[serde(rename = "simple")]
    SimpleChroma,
}

impl VectorscopePolicy {
    /// All policies, in declaration order.
    pub const ALL: [Self; 2] = [Self::Rec709Yuv, Self::SimpleChroma];

    /// Grid index (`y * SIZE + x`) for a pixel, or `None` if it plots off
    /// the grid.
    #[inline]
    pub fn cell(self, r: u8, g: u8, b: u8) -> Option<usize> {
        let (x, y) = self.coordinates(r, g, b);
        grid_index(x, y)
    }

    /// Unquantised-to-grid `(x, y)` coordinates. May lie outside the grid.
    pub fn coordinates(self, r: u8, g: u8, b: u8) -> (f64, f64) {
        match self {
            Self::Rec709Yuv => {
                let y = LumaWeights::REC709.luma(r, g, b);
                let u = (f64::from(b) - y) * U_SCALE;
                let v = (f64::from(r) - y) * V_SCALE;
                (
                    round_half_up(v / 128.0 * HALF + HALF),
                    round_half_up(-u / 128.0 * HALF + HALF),
                )
            }
            Self::SimpleChroma => {
                let y = LumaWeights::REC601.luma(r, g, b);
                let u = round_half_up(f64::from(b) - y);
                let v = round_half_up(f64::from(r) - y);
                let scale = HALF / 255.0;
                ((u * scale + HALF).floor(), (v * scale + HALF).floor())
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rec709Yuv => "rec709",
            Self::SimpleChroma => "simple",
        }
    }
}

impl fmt::Display for VectorscopePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VectorscopePolicy {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rec709" | "rec709yuv" | "yuv" => Ok(Self::Rec709Yuv),
            "simple" | "simplechroma" | "rec601" => Ok(Self::SimpleChroma),
            _ => Err(ScopeError::InvalidOption {
                name: "vectorscope policy",
                value: s.to_string(),
            }),
        }
    }
}

/// Row-major index for integral grid coordinates inside `[0, SIZE)²`.
#[inline]
fn grid_index(x: f64, y: f64) -> Option<usize> {
    let range = 0.0..SIZE as f64;
    if range.contains(&x) && range.contains(&y) {
        Some(y as usize * SIZE + x as usize)
    } else {
        None
    }
}

/// Vectorscope data: chrominance occupancy on a square grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorscopeData {
    /// Side length of the square grid.
    pub size: u32,
    /// Mapping that produced this grid.
    pub policy: VectorscopePolicy,
    /// Density values for each grid cell, `y * size + x`. Length = size².
    pub density: Vec<u32>,
}

impl VectorscopeData {
    pub fn at(&self, x: u32, y: u32) -> u32 {
        self.density[y as usize * self.size as usize + x as usize]
    }
}

/// Compute vectorscope from a frame using the given coordinate policy.
pub fn compute(image: &ScopeImage, policy: VectorscopePolicy) -> VectorscopeData {
    let mut density = vec![0u32; SIZE * SIZE];

    for &[r, g, b, _] in image.pixels() {
        if let Some(idx) = policy.cell(r, g, b) {
            density[idx] += 1;
        }
    }

    VectorscopeData {
        size: SIZE as u32,
        policy,
        density,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, px: [u8; 4]) -> ScopeImage {
        ScopeImage::new(width, height, px.repeat((width * height) as usize)).unwrap()
    }

    #[test]
    fn test_neutral_concentrates_at_center() {
        let image = uniform(2, 2, [128, 128, 128, 255]);
        for policy in VectorscopePolicy::ALL {
            let vs = compute(&image, policy);
            assert_eq!(vs.at(128, 128), 4, "{policy}");
            assert_eq!(vs.density.iter().sum::<u32>(), 4, "{policy}");
        }
    }

    #[test]
    fn test_all_grays_map_to_center() {
        for v in (0..=255u8).step_by(17) {
            for policy in VectorscopePolicy::ALL {
                assert_eq!(policy.cell(v, v, v), Some(128 * SIZE + 128), "{policy} gray {v}");
            }
        }
    }

    #[test]
    fn test_rec709_red_plots_right_and_below() {
        // Y = 54.213, U = -29.215, V = 127.500
        assert_eq!(
            VectorscopePolicy::Rec709Yuv.coordinates(255, 0, 0),
            (255.0, 157.0)
        );
    }

    #[test]
    fn test_rec709_blue_plots_top() {
        // Y = 18.411, U = 127.498, V = -11.691
        assert_eq!(
            VectorscopePolicy::Rec709Yuv.coordinates(0, 0, 255),
            (116.0, 1.0)
        );
    }

    #[test]
    fn test_simple_chroma_red() {
        // Y = 76.245, U = -76, V = 179
        assert_eq!(
            VectorscopePolicy::SimpleChroma.coordinates(255, 0, 0),
            (89.0, 217.0)
        );
    }

    #[test]
    fn test_policies_disagree_on_saturated_color() {
        let image = uniform(1, 1, [255, 0, 0, 255]);
        let a = compute(&image, VectorscopePolicy::Rec709Yuv);
        let b = compute(&image, VectorscopePolicy::SimpleChroma);
        assert_ne!(a.density, b.density);
    }

    #[test]
    fn test_off_grid_coordinates_are_dropped() {
        assert_eq!(grid_index(-1.0, 10.0), None);
        assert_eq!(grid_index(10.0, 256.0), None);
        assert_eq!(grid_index(256.0, 0.0), None);
        assert_eq!(grid_index(0.0, 0.0), Some(0));
        assert_eq!(grid_index(255.0, 255.0), Some(SIZE * SIZE - 1));
    }

    #[test]
    fn test_policy_parses_and_displays() {
        for policy in VectorscopePolicy::ALL {
            assert_eq!(policy.to_string().parse::<VectorscopePolicy>().unwrap(), policy);
        }
        assert_eq!("Rec601".parse::<VectorscopePolicy>().unwrap(), VectorscopePolicy::SimpleChroma);
        let err = "cie".parse::<VectorscopePolicy>().unwrap_err();
        assert!(matches!(err, ScopeError::InvalidOption { .. }), "{err:?}");
    }
}

//! RGB → HSL conversion for 8-bit samples.
//!
//! Not used by the scope reductions themselves; kept for tinting scope
//! output by hue.

use serde::{Deserialize, Serialize};

/// Hue, saturation and lightness, each normalised to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue as a fraction of a full turn (`degrees / 360`).
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Convert an 8-bit RGB triplet to HSL using the hexagonal projection.
///
/// ```text
///   L = (max + min) / 2
///   S = d / (max + min)          L ≤ 0.5
///       d / (2 − max − min)      L > 0.5        d = max − min
///   H = ((G − B)/d mod 6) / 6    max = R
///       ((B − R)/d + 2) / 6      max = G
///       ((R − G)/d + 4) / 6      max = B
/// ```
///
/// Achromatic input (`max == min`) yields `h = s = 0`.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    // Ties go to the first matching channel in R, G, B order.
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h / 6.0, s, l }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::{FromColor, Hsl as PaletteHsl, Srgb};

    const EPSILON: f64 = 1e-9;

    fn assert_hsl(actual: Hsl, h: f64, s: f64, l: f64) {
        assert!(
            (actual.h - h).abs() < EPSILON
                && (actual.s - s).abs() < EPSILON
                && (actual.l - l).abs() < EPSILON,
            "got {actual:?}, expected ({h}, {s}, {l})"
        );
    }

    #[test]
    fn test_white_is_achromatic_full_lightness() {
        assert_hsl(rgb_to_hsl(255, 255, 255), 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_black_is_achromatic_zero_lightness() {
        assert_hsl(rgb_to_hsl(0, 0, 0), 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_pure_red() {
        assert_hsl(rgb_to_hsl(255, 0, 0), 0.0, 1.0, 0.5);
    }

    #[test]
    fn test_primary_and_secondary_hues() {
        assert_hsl(rgb_to_hsl(0, 255, 0), 1.0 / 3.0, 1.0, 0.5);
        assert_hsl(rgb_to_hsl(0, 0, 255), 2.0 / 3.0, 1.0, 0.5);
        assert_hsl(rgb_to_hsl(255, 255, 0), 1.0 / 6.0, 1.0, 0.5);
        assert_hsl(rgb_to_hsl(255, 0, 255), 5.0 / 6.0, 1.0, 0.5);
    }

    #[test]
    fn test_mid_gray_has_no_hue() {
        let hsl = rgb_to_hsl(128, 128, 128);
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - 128.0 / 255.0).abs() < EPSILON);
    }

    #[test]
    fn test_components_stay_in_unit_range() {
        for r in (0..=255u16).step_by(51) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(51) {
                    let hsl = rgb_to_hsl(r as u8, g as u8, b as u8);
                    for v in [hsl.h, hsl.s, hsl.l] {
                        assert!((0.0..=1.0).contains(&v), "({r},{g},{b}) -> {hsl:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_matches_palette_conversion() {
        for (r, g, b) in [(200u8, 40u8, 90u8), (12, 180, 99), (250, 250, 10), (30, 60, 220)] {
            let ours = rgb_to_hsl(r, g, b);
            let srgb = Srgb::new(r, g, b).into_format::<f32>();
            let theirs: PaletteHsl = PaletteHsl::from_color(srgb);
            let hue = f64::from(theirs.hue.into_positive_degrees()) / 360.0;
            assert!((ours.h - hue).abs() < 1e-4, "hue ({r},{g},{b}): {} vs {hue}", ours.h);
            assert!((ours.s - f64::from(theirs.saturation)).abs() < 1e-4);
            assert!((ours.l - f64::from(theirs.lightness)).abs() < 1e-4);
        }
    }
}

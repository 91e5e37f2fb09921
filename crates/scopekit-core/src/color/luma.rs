//! Fixed-coefficient luma for 8-bit RGB.
//!
//! Scopes work on display-referred code values, so luma is a plain weighted
//! sum of the 0–255 samples with no linearisation.
//!
//! ```text
//!   Y = kr × R + kg × G + kb × B        kr + kg + kb = 1
//! ```

/// Luma coefficients for one standard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaWeights {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LumaWeights {
    /// ITU-R BT.709 (HD).
    pub const REC709: Self = Self {
        r: 0.2126,
        g: 0.7152,
        b: 0.0722,
    };

    /// ITU-R BT.601 (SD).
    pub const REC601: Self = Self {
        r: 0.299,
        g: 0.587,
        b: 0.114,
    };

    /// Weighted luma of an 8-bit triplet, in code values (0.0–255.0 up to
    /// float error).
    #[inline]
    pub fn luma(&self, r: u8, g: u8, b: u8) -> f64 {
        self.r * f64::from(r) + self.g * f64::from(g) + self.b * f64::from(b)
    }
}

/// Round to nearest with ties toward +∞ (`floor(v + 0.5)`).
///
/// Used for every scope quantisation so `-0.5` lands on `0`, not `-1`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

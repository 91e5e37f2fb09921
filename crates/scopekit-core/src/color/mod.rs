//! Colour helpers for luma weighting, scope rounding and RGB→HSL.

pub mod hsl;
pub mod luma;

pub use hsl::{Hsl, rgb_to_hsl};
pub use luma::{LumaWeights, round_half_up};

//! Frame representation consumed by the scopes.

use crate::error::{ScopeError, ScopeResult};

/// Bytes per interleaved RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Immutable 8-bit RGBA frame. Alpha is carried but never read.
///
/// The buffer length is checked on construction, so every scope can index
/// pixels without bounds surprises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ScopeImage {
    /// Wrap a packed RGBA buffer of `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> ScopeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScopeError::malformed(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                ScopeError::malformed(format!("{width}x{height} RGBA buffer overflows usize"))
            })?;

        if pixels.len() != expected {
            return Err(ScopeError::malformed(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / CHANNELS
    }

    /// Pixels as `[r, g, b, a]` quads, row-major.
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// One row of pixels. `y` must be below `height`.
    pub fn row(&self, y: u32) -> &[[u8; 4]] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.pixels()[start..start + width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 4]]> {
        self.pixels().chunks_exact(self.width as usize)
    }
}

impl TryFrom<::image::RgbaImage> for ScopeImage {
    type Error = ScopeError;

    fn try_from(img: ::image::RgbaImage) -> ScopeResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }
}

impl TryFrom<&::image::DynamicImage> for ScopeImage {
    type Error = ScopeError;

    fn try_from(img: &::image::DynamicImage) -> ScopeResult<Self> {
        Self::try_from(img.to_rgba8())
    }
}

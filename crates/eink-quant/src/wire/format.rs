//! Shared frame format contract.

use crate::palette::Palette;

use super::WireError;

/// Everything the producer and the consumer of an artifact must agree on.
///
/// Build it once from configuration and hand the same value to both the
/// encoder and the renderer instead of repeating width, height and palette
/// as separate constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFormat {
    width: u32,
    height: u32,
    palette: Palette,
}

impl FrameFormat {
    /// # Errors
    ///
    /// [`WireError::EmptyFrame`] if either dimension is zero.
    pub fn new(width: u32, height: u32, palette: Palette) -> Result<Self, WireError> {
        if width == 0 || height == 0 {
            return Err(WireError::EmptyFrame { width, height });
        }
        Ok(Self {
            width,
            height,
            palette,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Exact artifact length: one byte per pixel.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

//! Palette-index grid.

use crate::color::Rgb;
use crate::grid::{GridError, PixelGrid};
use crate::palette::Palette;

/// A `width x height` grid of palette indices in row-major order.
///
/// Indices are stored wider than a byte so that a grid produced against an
/// oversized palette is representable and can be rejected by the encoder
/// instead of silently wrapping.
///
/// # Example
///
/// ```
/// use eink_quant::{IndexGrid, Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let grid = IndexGrid::new(2, 2, vec![0, 1, 1, 0]).unwrap();
///
/// let pixels = grid.to_pixels(&palette).unwrap();
/// assert_eq!(pixels.get(1, 0), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGrid {
    width: u32,
    height: u32,
    indices: Vec<u16>,
}

impl IndexGrid {
    /// Wrap a row-major index buffer.
    ///
    /// # Errors
    ///
    /// [`GridError::SizeMismatch`] if `indices.len() != width * height`.
    pub fn new(width: u32, height: u32, indices: Vec<u16>) -> Result<Self, GridError> {
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                actual: indices.len(),
            });
        }
        Ok(Self {
            width,
            height,
            indices,
        })
    }

    /// Wrap indices whose length the caller already guarantees.
    pub(crate) fn from_parts(width: u32, height: u32, indices: Vec<u16>) -> Self {
        debug_assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length must match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            indices,
        }
    }

    /// Build a grid from one byte per index.
    pub fn from_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, GridError> {
        Self::new(width, height, bytes.iter().map(|&b| b as u16).collect())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Index at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u16 {
        self.indices[y as usize * self.width as usize + x as usize]
    }

    /// All indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Position and value of the first index with no palette entry.
    pub fn first_out_of_range(&self, palette_len: usize) -> Option<(usize, u16)> {
        self.indices
            .iter()
            .enumerate()
            .find(|(_, &idx)| idx as usize >= palette_len)
            .map(|(pos, &idx)| (pos, idx))
    }

    /// Expand to colors by looking every index up in `palette`.
    ///
    /// # Errors
    ///
    /// [`GridError::IndexOutOfRange`] for the first index without an entry.
    pub fn to_pixels(&self, palette: &Palette) -> Result<PixelGrid, GridError> {
        if let Some((position, index)) = self.first_out_of_range(palette.len()) {
            return Err(GridError::IndexOutOfRange {
                position,
                index,
                palette_len: palette.len(),
            });
        }
        let pixels: Vec<Rgb> = self
            .indices
            .iter()
            .map(|&idx| palette.color(idx as usize))
            .collect();
        PixelGrid::new(self.width, self.height, pixels)
    }
}

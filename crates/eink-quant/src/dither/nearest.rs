//! Quantization without error diffusion.

use crate::grid::PixelGrid;
use crate::output::IndexGrid;
use crate::palette::Palette;

use super::Dither;

/// Maps every sample to its nearest palette entry independently.
///
/// No error is carried between pixels, so gradients band. Applied to an
/// image that already contains only palette colors it reproduces exactly
/// those colors' indices.
pub struct NearestColor;

impl Dither for NearestColor {
    fn dither(&self, grid: PixelGrid, palette: &Palette) -> IndexGrid {
        let (width, height) = grid.dimensions();
        let indices = grid
            .pixels()
            .iter()
            .map(|&p| palette.find_nearest(p).0 as u16)
            .collect();
        IndexGrid::from_parts(width, height, indices)
    }
}

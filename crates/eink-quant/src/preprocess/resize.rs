//! Lanczos3 resampling through the `image` crate.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb as ImageRgb};

use crate::color::Rgb;
use crate::grid::PixelGrid;

/// Resample `grid` to exactly `new_width x new_height` with a Lanczos3 filter.
///
/// Returns the grid unchanged when it already has the requested size, so a
/// source at the canonical resolution is never resampled.
pub fn resize_lanczos(grid: PixelGrid, new_width: u32, new_height: u32) -> PixelGrid {
    if grid.dimensions() == (new_width, new_height) {
        return grid;
    }
    if grid.pixels().is_empty() || new_width == 0 || new_height == 0 {
        // nothing to sample from, or nothing to sample into
        return PixelGrid::filled(new_width, new_height, Rgb::default());
    }

    let source = ImageBuffer::from_fn(grid.width(), grid.height(), |x, y| {
        ImageRgb(grid.get(x, y).to_bytes())
    });
    let resized = imageops::resize(&source, new_width, new_height, FilterType::Lanczos3);

    PixelGrid::from_fn(new_width, new_height, |x, y| {
        Rgb::from_bytes(resized.get_pixel(x, y).0)
    })
}

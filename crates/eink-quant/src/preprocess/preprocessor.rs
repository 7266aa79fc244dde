//! Brightness, contrast and resize in a fixed order.

use crate::color::Rgb;
use crate::grid::PixelGrid;
use crate::preprocess::PreprocessOptions;

use super::resize::resize_lanczos;

/// Applies [`PreprocessOptions`] to a source grid.
///
/// Brightness and contrast are per-channel point operations on 8-bit sRGB
/// values; resizing happens last so it sees the adjusted colors.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    #[inline]
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Run brightness, then contrast, then resize.
    pub fn process(&self, mut grid: PixelGrid) -> PixelGrid {
        let brightness = self.options.brightness;
        let contrast = self.options.contrast;

        if brightness != 1.0 || contrast != 1.0 {
            for pixel in grid.pixels_mut() {
                let mut p = *pixel;
                if brightness != 1.0 {
                    p = map_channels(p, |v| scale(v, brightness));
                }
                if contrast != 1.0 {
                    p = map_channels(p, |v| stretch(v, contrast));
                }
                *pixel = p;
            }
        }

        match self.options.target() {
            Some((width, height)) => resize_lanczos(grid, width, height),
            None => grid,
        }
    }
}

#[inline]
fn map_channels(p: Rgb, f: impl Fn(u8) -> u8) -> Rgb {
    Rgb::new(f(p.r), f(p.g), f(p.b))
}

#[inline]
fn scale(v: u8, factor: f32) -> u8 {
    to_channel(v as f32 * factor)
}

#[inline]
fn stretch(v: u8, factor: f32) -> u8 {
    to_channel(128.0 + (v as f32 - 128.0) * factor)
}

#[inline]
fn to_channel(v: f32) -> u8 {
    // NaN saturates to 0 under `as`
    v.round().clamp(0.0, 255.0) as u8
}

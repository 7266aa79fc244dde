//! Palette quantization with and without error diffusion.
//!
//! Both modes implement [`Dither`]: they take ownership of a preprocessed
//! [`PixelGrid`] and produce an [`IndexGrid`] of the same size.
//!
//! - [`FloydSteinberg`]: error diffusion in row-major scan order
//! - [`NearestColor`]: plain nearest-color mapping, no diffusion
//!
//! Quantization is strictly sequential. Every pixel depends on error pushed
//! forward by pixels before it in the scan, so the same input, palette and
//! mode always produce the same indices.
//!
//! # Example
//!
//! ```
//! use eink_quant::{Dither, DitherMode, Palette, PixelGrid, Rgb};
//!
//! let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
//! let grid = PixelGrid::filled(4, 4, Rgb::new(128, 128, 128));
//!
//! let flat = DitherMode::None.quantize(grid.clone(), &palette);
//! assert!(flat.indices().iter().all(|&i| i == 1));
//!
//! let dithered = DitherMode::FloydSteinberg.quantize(grid, &palette);
//! assert!(dithered.indices().contains(&0));
//! ```

mod floyd_steinberg;
mod kernel;
mod nearest;

use std::fmt;
use std::str::FromStr;

use crate::grid::PixelGrid;
use crate::output::IndexGrid;
use crate::palette::Palette;

pub use floyd_steinberg::FloydSteinberg;
pub use kernel::*;
pub use nearest::NearestColor;

/// A quantization strategy from full color to palette indices.
pub trait Dither {
    /// Quantize `grid` against `palette`.
    ///
    /// The grid is consumed: error diffusion uses it as scratch space.
    fn dither(&self, grid: PixelGrid, palette: &Palette) -> IndexGrid;
}

/// Quantization mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMode {
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,

    /// Nearest color only. Useful for checking how well a palette fits.
    None,
}

impl DitherMode {
    /// Quantize `grid` with this mode.
    pub fn quantize(self, grid: PixelGrid, palette: &Palette) -> IndexGrid {
        match self {
            DitherMode::FloydSteinberg => FloydSteinberg.dither(grid, palette),
            DitherMode::None => NearestColor.dither(grid, palette),
        }
    }

    /// Name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            DitherMode::FloydSteinberg => "floyd-steinberg",
            DitherMode::None => "none",
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dither mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDitherModeError(pub String);

impl fmt::Display for ParseDitherModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown dither mode '{}' (expected floyd-steinberg or none)",
            self.0
        )
    }
}

impl std::error::Error for ParseDitherModeError {}

impl FromStr for DitherMode {
    type Err = ParseDitherModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "floyd-steinberg" | "floyd_steinberg" | "floydsteinberg" | "fs" => {
                Ok(DitherMode::FloydSteinberg)
            }
            "none" | "off" => Ok(DitherMode::None),
            _ => Err(ParseDitherModeError(s.to_string())),
        }
    }
}

//! Ordered color palette with nearest-color matching.

use std::collections::HashSet;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

/// Largest palette whose indices still fit in one byte.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Pimoroni Inky Frame 7.3" (Spectra 6 + taupe) palette in panel pen order:
/// black, white, green, blue, red, yellow, orange, taupe.
pub const SPECTRA_8: [Rgb; 8] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 255, 255),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(255, 128, 0),
    Rgb::new(128, 128, 128),
];

/// An ordered, immutable set of unique colors.
///
/// Declaration order is significant. It defines the index each color is
/// written as on the wire, and it breaks ties in [`Palette::find_nearest`]:
/// reordering a palette can change the output for equidistant samples.
///
/// # Example
///
/// ```
/// use eink_quant::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let (idx, color) = palette.find_nearest(Rgb::new(200, 210, 190));
/// assert_eq!(idx, 1);
/// assert_eq!(color, Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from colors in index order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if there are more than 256 colors
    /// - [`PaletteError::DuplicateColor`] with the index of the first repeat
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }

        let mut seen = HashSet::new();
        for (i, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from hex color strings such as `"#FF0000"` or `"F00"`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any string is invalid, or the
    /// validation errors of [`Palette::new`].
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        let parsed: Vec<Rgb> = colors
            .iter()
            .map(|s| Rgb::from_str(s.as_ref()).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(&parsed)
    }

    /// The default 8-color Spectra palette.
    pub fn spectra8() -> Self {
        Self {
            colors: SPECTRA_8.to_vec(),
        }
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `idx`, or `None` if the index is outside the palette.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Rgb> {
        self.colors.get(idx).copied()
    }

    /// Color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Find the palette entry closest to `sample` by squared Euclidean
    /// distance in RGB.
    ///
    /// Returns the index and the palette's exact color (not the input),
    /// which is what quantization error is measured against. On a tie the
    /// lowest index wins.
    #[inline]
    pub fn find_nearest(&self, sample: Rgb) -> (usize, Rgb) {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &candidate) in self.colors.iter().enumerate() {
            let dist = sample.distance_squared(candidate);
            // strict `<` keeps the earliest index on ties
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }

        (best_idx, self.colors[best_idx])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::spectra8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ParseColorError;

    fn black_white() -> Palette {
        Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap()
    }

    #[test]
    fn test_palette_basic_construction() {
        let palette = Palette::new(&[
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 0, 0),
        ])
        .unwrap();
        assert_eq!(palette.len(), 3);
        assert!(!palette.is_empty());
        assert_eq!(palette.color(2), Rgb::new(255, 0, 0));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_palette_empty_error() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_palette_duplicate_reports_first_repeat() {
        let result = Palette::new(&[
            Rgb::new(0, 0, 0),
            Rgb::new(1, 1, 1),
            Rgb::new(0, 0, 0),
        ]);
        assert_eq!(result, Err(PaletteError::DuplicateColor { index: 2 }));
    }

    #[test]
    fn test_palette_size_limit() {
        let full: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, 0, 0)).collect();
        assert_eq!(Palette::new(&full).unwrap().len(), 256);

        let mut over = full;
        over.push(Rgb::new(0, 1, 0));
        assert_eq!(
            Palette::new(&over),
            Err(PaletteError::TooManyColors { count: 257 })
        );
    }

    #[test]
    fn test_spectra8_default_order() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.color(0), Rgb::new(0, 0, 0));
        assert_eq!(palette.color(1), Rgb::new(255, 255, 255));
        assert_eq!(palette.color(6), Rgb::new(255, 128, 0));
        assert_eq!(palette.color(7), Rgb::new(128, 128, 128));
        // the constant must itself be a valid palette
        assert_eq!(Palette::new(&SPECTRA_8).unwrap(), palette);
    }

    #[test]
    fn test_from_hex() {
        let palette = Palette::from_hex(&["#000000", "FFF", "#ff0000"]).unwrap();
        assert_eq!(palette.colors(), &[
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 0, 0),
        ]);

        let owned = vec![String::from("#00FF00")];
        assert_eq!(Palette::from_hex(&owned).unwrap().len(), 1);
    }

    #[test]
    fn test_from_hex_invalid() {
        assert_eq!(
            Palette::from_hex(&["#000000", "#12345"]),
            Err(PaletteError::ParseColor(ParseColorError::InvalidLength))
        );
    }

    #[test]
    fn test_find_nearest_exact_match() {
        let palette = Palette::spectra8();
        for (i, &color) in SPECTRA_8.iter().enumerate() {
            assert_eq!(palette.find_nearest(color), (i, color));
        }
    }

    #[test]
    fn test_find_nearest_returns_palette_color() {
        let (idx, color) = black_white().find_nearest(Rgb::new(30, 40, 50));
        assert_eq!(idx, 0);
        assert_eq!(color, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_find_nearest_mid_gray_prefers_white() {
        // 127^2 < 128^2, so 128 is strictly closer to white
        let (idx, _) = black_white().find_nearest(Rgb::new(128, 128, 128));
        assert_eq!(idx, 1);
        let (idx, _) = black_white().find_nearest(Rgb::new(127, 127, 127));
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_find_nearest_tie_goes_to_lowest_index() {
        // (100,0,0) is exactly 100 away from both entries
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 0, 0);
        let sample = Rgb::new(100, 0, 0);

        let forward = Palette::new(&[a, b]).unwrap();
        assert_eq!(forward.find_nearest(sample), (0, a));

        let reversed = Palette::new(&[b, a]).unwrap();
        assert_eq!(reversed.find_nearest(sample), (0, b));
    }

    #[test]
    fn test_find_nearest_is_minimal_over_grid() {
        let palette = Palette::spectra8();
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(15) {
                    let sample = Rgb::new(r as u8, g as u8, b as u8);
                    let (idx, color) = palette.find_nearest(sample);
                    assert!(idx < palette.len());
                    assert_eq!(color, palette.color(idx));

                    let best = sample.distance_squared(color);
                    for (j, &other) in palette.colors().iter().enumerate() {
                        let d = sample.distance_squared(other);
                        assert!(d >= best, "index {j} is closer to {sample}");
                        if j < idx {
                            assert!(d > best, "tie at {j} should have won for {sample}");
                        }
                    }
                }
            }
        }
    }
}

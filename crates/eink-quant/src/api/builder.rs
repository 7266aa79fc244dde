//! FrameQuantizer builder -- the encode-side entry point of the crate.

use crate::dither::DitherMode;
use crate::grid::PixelGrid;
use crate::output::IndexGrid;
use crate::palette::Palette;
use crate::preprocess::{PreprocessOptions, Preprocessor};
use crate::wire::{self, FrameFormat};

use super::QuantError;

/// Preprocess, quantize and encode photographs for one palette.
///
/// - Constructor requires a [`Palette`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self`, so one builder serves
///   any number of images
///
/// # Example
///
/// ```
/// use eink_quant::{DitherMode, FrameQuantizer, Palette, PixelGrid, Rgb};
///
/// let quantizer = FrameQuantizer::new(Palette::spectra8())
///     .brightness(1.3)
///     .contrast(1.2)
///     .resize(8, 4)
///     .dither(DitherMode::FloydSteinberg);
///
/// let photo = PixelGrid::filled(16, 8, Rgb::new(90, 140, 200));
/// let indices = quantizer.quantize(photo);
///
/// assert_eq!((indices.width(), indices.height()), (8, 4));
/// ```
#[derive(Debug, Clone)]
pub struct FrameQuantizer {
    palette: Palette,
    preprocess: PreprocessOptions,
    mode: DitherMode,
}

impl FrameQuantizer {
    /// Floyd-Steinberg with neutral preprocessing and no resize.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            preprocess: PreprocessOptions::default(),
            mode: DitherMode::default(),
        }
    }

    /// A quantizer whose palette and output size come from `format`.
    pub fn for_format(format: &FrameFormat) -> Self {
        Self::new(format.palette().clone()).resize(format.width(), format.height())
    }

    #[inline]
    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.preprocess = self.preprocess.resize(width, height);
        self
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.preprocess = self.preprocess.brightness(factor);
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.preprocess = self.preprocess.contrast(factor);
        self
    }

    /// Replace all preprocessing options at once.
    #[inline]
    pub fn preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    #[inline]
    pub fn dither(mut self, mode: DitherMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn mode(&self) -> DitherMode {
        self.mode
    }

    #[inline]
    pub fn preprocess_options(&self) -> &PreprocessOptions {
        &self.preprocess
    }

    /// Run preprocessing, then quantization.
    pub fn quantize(&self, source: PixelGrid) -> IndexGrid {
        let prepared = Preprocessor::new(self.preprocess.clone()).process(source);
        self.mode.quantize(prepared, &self.palette)
    }

    /// Quantize and encode into the artifact for `format`.
    ///
    /// # Errors
    ///
    /// [`QuantError::Wire`] if the result does not satisfy `format`, e.g.
    /// because the quantizer was built for a different size or palette.
    pub fn encode(&self, source: PixelGrid, format: &FrameFormat) -> Result<Vec<u8>, QuantError> {
        let indices = self.quantize(source);
        Ok(wire::encode(&indices, format)?)
    }
}

//! Preprocessing options and configuration.

/// Configuration for the [`Preprocessor`](super::Preprocessor).
///
/// # Defaults
///
/// [`PreprocessOptions::new`] is neutral: both factors are 1.0 and no resize
/// is requested. [`PreprocessOptions::photo_frame`] is the tuning used for
/// the 7.3" Spectra panel (brightness 1.3, contrast 1.2).
///
/// # Example
///
/// ```
/// use eink_quant::PreprocessOptions;
///
/// let options = PreprocessOptions::new()
///     .resize(800, 480)
///     .brightness(1.4)
///     .contrast(1.2);
/// assert_eq!(options.target_width, Some(800));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptions {
    /// Target width for resize (None = preserve original).
    pub target_width: Option<u32>,

    /// Target height for resize (None = preserve original).
    pub target_height: Option<u32>,

    /// Per-channel brightness multiplier.
    ///
    /// - 1.0 = no change
    /// - 1.3 = default for the photo frame
    pub brightness: f32,

    /// Contrast multiplier around mid-gray (128).
    ///
    /// - 1.0 = no change
    /// - 1.2 = default for the photo frame
    /// - 0.0 = everything collapses to 128
    pub contrast: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            target_width: None,
            target_height: None,
            brightness: 1.0,
            contrast: 1.0,
        }
    }
}

impl PreprocessOptions {
    /// Create neutral options (no adjustment, no resize).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for photographs on the 7.3" Spectra photo frame.
    pub fn photo_frame() -> Self {
        Self::new().brightness(1.3).contrast(1.2)
    }

    /// Set target dimensions for resize.
    ///
    /// Both dimensions are required; the image is scaled to exactly this
    /// size without preserving aspect ratio.
    #[inline]
    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.target_width = Some(width);
        self.target_height = Some(height);
        self
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.brightness = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    /// Target dimensions if both were set.
    #[inline]
    pub fn target(&self) -> Option<(u32, u32)> {
        self.target_width.zip(self.target_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = PreprocessOptions::default();
        assert!(opts.target_width.is_none());
        assert!(opts.target_height.is_none());
        assert!((opts.brightness - 1.0).abs() < f32::EPSILON);
        assert!((opts.contrast - 1.0).abs() < f32::EPSILON);
        assert_eq!(opts, PreprocessOptions::new());
    }

    #[test]
    fn test_photo_frame_preset() {
        let opts = PreprocessOptions::photo_frame();
        assert!((opts.brightness - 1.3).abs() < f32::EPSILON);
        assert!((opts.contrast - 1.2).abs() < f32::EPSILON);
        assert!(opts.target().is_none());
    }

    #[test]
    fn test_builder_resize() {
        let opts = PreprocessOptions::new().resize(800, 480);
        assert_eq!(opts.target(), Some((800, 480)));
        // Other values unchanged
        assert!((opts.brightness - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_target_requires_both_dimensions() {
        let opts = PreprocessOptions {
            target_width: Some(10),
            ..PreprocessOptions::default()
        };
        assert_eq!(opts.target(), None);
    }
}

//! Image preprocessing before quantization.
//!
//! Low-reflectance color e-ink panels look dull when fed a photo as-is, so
//! the source is brightened and stretched before it is quantized. The stages
//! always run in this order:
//!
//! 1. **Brightness**: `out = clamp(in * brightness, 0, 255)`
//! 2. **Contrast**: `out = clamp(128 + (in - 128) * contrast, 0, 255)`
//! 3. **Resize** (Lanczos3) to the canonical frame resolution
//!
//! A factor of exactly 1.0 skips its stage, and a grid that already has the
//! target dimensions is not resampled.
//!
//! # Example
//!
//! ```
//! use eink_quant::{PixelGrid, PreprocessOptions, Preprocessor, Rgb};
//!
//! let options = PreprocessOptions::new().brightness(2.0).resize(4, 2);
//! let preprocessor = Preprocessor::new(options);
//!
//! let source = PixelGrid::filled(4, 2, Rgb::new(100, 100, 100));
//! let result = preprocessor.process(source);
//!
//! assert_eq!(result.dimensions(), (4, 2));
//! assert_eq!(result.get(0, 0), Rgb::new(200, 200, 200));
//! ```

mod options;
mod preprocessor;
mod resize;

pub use options::PreprocessOptions;
pub use preprocessor::Preprocessor;
pub use resize::resize_lanczos;

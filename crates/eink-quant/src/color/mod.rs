//! Color type and hex parsing
//!
//! Everything in this crate works on 8-bit sRGB triples. Quantization error
//! is carried in the same channel space as the samples, so there is no
//! linearization step anywhere in the pipeline.
//!
//! # Example
//!
//! ```
//! use eink_quant::Rgb;
//!
//! let orange: Rgb = "#FF8000".parse().unwrap();
//! assert_eq!(orange, Rgb::new(255, 128, 0));
//! ```

mod rgb;

pub use rgb::Rgb;

#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! eink-quant: fixed-palette quantization and frame streaming for e-ink panels
//!
//! This library turns a truecolor photograph into one palette index per
//! pixel and carries that result to a display that can only draw with a
//! handful of pens.
//!
//! # Quick Start
//!
//! ```
//! use eink_quant::render::{render_frame, MemorySurface};
//! use eink_quant::wire::FrameFormat;
//! use eink_quant::{FrameQuantizer, Palette, PixelGrid, Rgb};
//!
//! // Shared by producer and consumer
//! let format = FrameFormat::new(8, 4, Palette::spectra8()).unwrap();
//!
//! // Producer: preprocess, dither, encode
//! let photo = PixelGrid::filled(32, 16, Rgb::new(30, 60, 200));
//! let artifact = FrameQuantizer::for_format(&format)
//!     .brightness(1.3)
//!     .contrast(1.2)
//!     .encode(photo, &format)
//!     .unwrap();
//! assert_eq!(artifact.len(), format.byte_len());
//!
//! // Consumer: stream onto a surface
//! let mut surface = MemorySurface::new(8, 4);
//! let report = render_frame(&mut surface, &format, 1, &artifact).unwrap();
//! assert!(report.is_complete());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelGrid (source photo, 8-bit sRGB)
//!     |
//!     v
//! [Preprocessor]  brightness -> contrast -> Lanczos3 resize
//!     |
//!     v
//! [Dither]        Floyd-Steinberg or nearest color, row-major, in place
//!     |
//!     v
//! IndexGrid       one palette index per pixel
//!     |
//!     v
//! [wire::encode]  width * height bytes, no header
//!     |
//!     :  (transport, out of this crate)
//!     v
//! [FrameRenderer] clear once, set pen + draw per byte, commit once
//! ```
//!
//! # Color Matching
//!
//! Nearest color is plain squared Euclidean distance on 8-bit sRGB
//! channels, and quantization error is diffused in the same space. With a
//! palette of eight saturated inks the gamma-aware refinements buy little,
//! and staying in integers keeps the output bit-for-bit reproducible across
//! platforms.
//!
//! Ties go to the lowest palette index. The palette order is therefore part
//! of the output contract, not just of the wire format.
//!
//! # Frame Format
//!
//! The artifact has no header. [`wire::FrameFormat`] carries width, height
//! and palette; build it once and pass the same value to the encoder and
//! to the renderer.

pub mod api;
pub mod color;
pub mod dither;
pub mod grid;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod render;
pub mod wire;


pub use api::{FrameQuantizer, QuantError};
pub use color::Rgb;
pub use dither::{Dither, DitherMode, FloydSteinberg, NearestColor};
pub use grid::{GridError, PixelGrid};
pub use output::IndexGrid;
pub use palette::{Palette, PaletteError, ParseColorError, SPECTRA_8};
pub use preprocess::{PreprocessOptions, Preprocessor};

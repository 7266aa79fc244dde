//! The byte-per-pixel frame format.
//!
//! An artifact is exactly `width * height` bytes in row-major order, each
//! byte a palette index. There is no header: width, height and palette order
//! travel out of band as a [`FrameFormat`] that the producer and the
//! consumer must share. Changing the palette order invalidates every
//! artifact produced with the old order.
//!
//! - [`encode`] flattens an [`IndexGrid`](crate::IndexGrid) and refuses any
//!   index the format cannot carry.
//! - [`decode`] is the strict inverse, used for tooling and tests. The
//!   lenient streaming consumer lives in [`render`](crate::render).
//!
//! # Example
//!
//! ```
//! use eink_quant::wire::{decode, encode, FrameFormat};
//! use eink_quant::{IndexGrid, Palette};
//!
//! let format = FrameFormat::new(3, 2, Palette::spectra8()).unwrap();
//! let grid = IndexGrid::from_bytes(3, 2, &[0, 1, 2, 3, 4, 7]).unwrap();
//!
//! let bytes = encode(&grid, &format).unwrap();
//! assert_eq!(bytes, [0, 1, 2, 3, 4, 7]);
//! assert_eq!(decode(&bytes, &format).unwrap(), grid);
//! ```

mod decoder;
mod encoder;
mod error;
mod format;

pub use decoder::decode;
pub use encoder::encode;
pub use error::WireError;
pub use format::FrameFormat;

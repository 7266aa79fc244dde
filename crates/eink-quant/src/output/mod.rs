//! Quantizer output.
//!
//! [`IndexGrid`] is the image in palette space: one index per pixel in
//! row-major order. It is logically the wire artifact reshaped to 2D, and
//! can be expanded back to colors with [`IndexGrid::to_pixels`] for previews.

mod index_grid;

pub use index_grid::IndexGrid;

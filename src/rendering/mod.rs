pub mod preview;

pub use preview::{encode_indexed_png, png_bit_depth};

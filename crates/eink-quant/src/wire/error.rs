//! Error type for frame encoding, decoding and rendering setup.

use std::fmt;

/// Error type for the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Width or height is zero
    EmptyFrame {
        width: u32,
        height: u32,
    },
    /// Grid dimensions differ from the frame format
    DimensionMismatch {
        /// Dimensions the format requires
        expected: (u32, u32),
        /// Dimensions of the grid
        actual: (u32, u32),
    },
    /// An index does not fit in one byte
    IndexOverflow {
        /// Row-major position of the index
        position: usize,
        /// The index value
        index: u16,
    },
    /// An index has no palette entry
    IndexOutOfPalette {
        /// Row-major position of the index
        position: usize,
        /// The index value
        index: u16,
        /// Number of palette entries
        palette_len: usize,
    },
    /// Byte count differs from `width * height`
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
    /// Display surface bounds differ from the frame format
    SurfaceMismatch {
        /// Dimensions the format requires
        expected: (u32, u32),
        /// Bounds reported by the surface
        actual: (u32, u32),
    },
    /// Background pen has no palette entry
    InvalidPen {
        pen: u8,
        palette_len: usize,
    },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::EmptyFrame { width, height } => {
                write!(f, "frame dimensions must be non-zero, got {}x{}", width, height)
            }
            WireError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "grid is {}x{}, frame format requires {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            WireError::IndexOverflow { position, index } => {
                write!(
                    f,
                    "index {} at position {} does not fit in one byte",
                    index, position
                )
            }
            WireError::IndexOutOfPalette {
                position,
                index,
                palette_len,
            } => {
                write!(
                    f,
                    "index {} at position {} is outside a {}-color palette",
                    index, position, palette_len
                )
            }
            WireError::LengthMismatch { expected, actual } => {
                write!(f, "frame has {} bytes, expected {}", actual, expected)
            }
            WireError::SurfaceMismatch { expected, actual } => {
                write!(
                    f,
                    "display surface is {}x{}, frame format requires {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            WireError::InvalidPen { pen, palette_len } => {
                write!(
                    f,
                    "background pen {} is outside a {}-color palette",
                    pen, palette_len
                )
            }
        }
    }
}

impl std::error::Error for WireError {}

//! Strict byte stream to index grid.

use crate::output::IndexGrid;

use super::{FrameFormat, WireError};

/// Rebuild the index grid from a complete artifact.
///
/// Unlike the streaming renderer this refuses anything but a well-formed
/// artifact: the length must be exactly `width * height` and every byte
/// must name a palette entry.
pub fn decode(bytes: &[u8], format: &FrameFormat) -> Result<IndexGrid, WireError> {
    if bytes.len() != format.byte_len() {
        return Err(WireError::LengthMismatch {
            expected: format.byte_len(),
            actual: bytes.len(),
        });
    }

    let palette_len = format.palette().len();
    if let Some(position) = bytes.iter().position(|&b| b as usize >= palette_len) {
        return Err(WireError::IndexOutOfPalette {
            position,
            index: bytes[position] as u16,
            palette_len,
        });
    }

    Ok(IndexGrid::from_parts(
        format.width(),
        format.height(),
        bytes.iter().map(|&b| b as u16).collect(),
    ))
}

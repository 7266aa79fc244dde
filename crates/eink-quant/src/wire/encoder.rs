//! Index grid to byte stream.

use crate::output::IndexGrid;

use super::{FrameFormat, WireError};

/// Flatten `grid` into the artifact for `format`.
///
/// Every index is checked, never truncated: an index above 255 is
/// [`WireError::IndexOverflow`], an index without a palette entry is
/// [`WireError::IndexOutOfPalette`]. Either one points at a quantizer and
/// palette that disagree.
pub fn encode(grid: &IndexGrid, format: &FrameFormat) -> Result<Vec<u8>, WireError> {
    let actual = (grid.width(), grid.height());
    if actual != format.dimensions() {
        return Err(WireError::DimensionMismatch {
            expected: format.dimensions(),
            actual,
        });
    }

    let palette_len = format.palette().len();
    let mut bytes = Vec::with_capacity(format.byte_len());
    for (position, &index) in grid.indices().iter().enumerate() {
        let byte =
            u8::try_from(index).map_err(|_| WireError::IndexOverflow { position, index })?;
        if byte as usize >= palette_len {
            return Err(WireError::IndexOutOfPalette {
                position,
                index,
                palette_len,
            });
        }
        bytes.push(byte);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::Palette;

    fn bw_format(width: u32, height: u32) -> FrameFormat {
        let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
        FrameFormat::new(width, height, palette).unwrap()
    }

    #[test]
    fn test_encode_is_row_major() {
        let grid = IndexGrid::new(2, 2, vec![0, 1, 1, 0]).unwrap();
        assert_eq!(encode(&grid, &bw_format(2, 2)).unwrap(), vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_single_pixel_is_one_byte() {
        let grid = IndexGrid::new(1, 1, vec![1]).unwrap();
        assert_eq!(encode(&grid, &bw_format(1, 1)).unwrap(), vec![1]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let grid = IndexGrid::new(2, 1, vec![0, 1]).unwrap();
        assert_eq!(
            encode(&grid, &bw_format(1, 2)),
            Err(WireError::DimensionMismatch {
                expected: (1, 2),
                actual: (2, 1)
            })
        );
    }

    #[test]
    fn test_index_overflow_is_not_truncated() {
        // 256 would wrap to 0, which is a valid index
        let grid = IndexGrid::new(3, 1, vec![0, 256, 1]).unwrap();
        assert_eq!(
            encode(&grid, &bw_format(3, 1)),
            Err(WireError::IndexOverflow {
                position: 1,
                index: 256
            })
        );
    }

    #[test]
    fn test_index_outside_palette() {
        let grid = IndexGrid::new(3, 1, vec![0, 1, 2]).unwrap();
        assert_eq!(
            encode(&grid, &bw_format(3, 1)),
            Err(WireError::IndexOutOfPalette {
                position: 2,
                index: 2,
                palette_len: 2
            })
        );
    }

    #[test]
    fn test_full_byte_range_with_large_palette() {
        let colors: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, v, 0)).collect();
        let format = FrameFormat::new(16, 16, Palette::new(&colors).unwrap()).unwrap();
        let grid = IndexGrid::new(16, 16, (0..256).collect()).unwrap();
        let bytes = encode(&grid, &format).unwrap();
        assert_eq!(bytes[255], 255);
        assert_eq!(bytes.len(), 256);
    }
}

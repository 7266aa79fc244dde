//! Indexed PNG previews of quantized frames.
//!
//! The preview uses the frame's palette as PLTE and the smallest bit depth
//! that can address it, so opening the PNG shows exactly the pens the panel
//! will draw.

use eink_quant::{GridError, IndexGrid, Palette};
use std::io::Cursor;

use crate::error::PrepareError;

/// Bit depth for an indexed PNG with `palette_len` entries.
pub fn png_bit_depth(palette_len: usize) -> (png::BitDepth, u8) {
    match palette_len {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Encode `grid` as an indexed-color PNG with `palette` as PLTE.
pub fn encode_indexed_png(grid: &IndexGrid, palette: &Palette) -> Result<Vec<u8>, PrepareError> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(PrepareError::PngEncode("frame has no pixels".into()));
    }
    if let Some((position, index)) = grid.first_out_of_range(palette.len()) {
        return Err(GridError::IndexOutOfRange {
            position,
            index,
            palette_len: palette.len(),
        }
        .into());
    }

    let indices: Vec<u8> = grid.indices().iter().map(|&i| i as u8).collect();
    let (depth, bits) = png_bit_depth(palette.len());
    let packed = if bits == 8 {
        indices
    } else {
        pack_nbits(&indices, grid.width(), bits)
    };
    let plte: Vec<u8> = palette.colors().iter().flat_map(|c| c.to_bytes()).collect();

    encode_png(grid.width(), grid.height(), depth, &plte, &packed)
}

fn encode_png(
    width: u32,
    height: u32,
    bit_depth: png::BitDepth,
    plte: &[u8],
    packed: &[u8],
) -> Result<Vec<u8>, PrepareError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PrepareError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| PrepareError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

//! Floyd-Steinberg error diffusion.

use crate::color::Rgb;
use crate::grid::PixelGrid;
use crate::output::IndexGrid;
use crate::palette::Palette;

use super::{Dither, Kernel, FLOYD_STEINBERG};

/// Fractional bits of the fixed-point working buffer.
const FRACTION_BITS: u32 = 4;
const ONE: i32 = 1 << FRACTION_BITS;
const CHANNEL_MAX: i32 = 255 * ONE;

/// Floyd-Steinberg error diffusion dithering.
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Pixels are visited strictly left to right, top to bottom, with no
/// serpentine reversal. Each pixel is matched against the palette after
/// the error from its already-visited neighbors has been added, and its own
/// error is then pushed to the four unvisited neighbors. Neighbors outside
/// the grid are skipped. Every neighbor value is clamped to the channel
/// range when written, so error cannot pile up at the edges.
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, grid: PixelGrid, palette: &Palette) -> IndexGrid {
        diffuse_with_kernel(grid, palette, &FLOYD_STEINBERG)
    }
}

/// Quantize `grid` while diffusing error through `kernel`.
///
/// Samples are kept in fixed point with [`FRACTION_BITS`] fractional bits so
/// that diffusion is exact integer arithmetic. Every share is the error
/// scaled by its weight and truncated toward zero, except the last kernel
/// entry which takes whatever remains, so the shares always add up to the
/// full error.
pub fn diffuse_with_kernel(grid: PixelGrid, palette: &Palette, kernel: &Kernel) -> IndexGrid {
    let (width, height) = grid.dimensions();
    let w = width as usize;
    let h = height as usize;

    let mut work: Vec<[i32; 3]> = grid
        .into_pixels()
        .into_iter()
        .map(|p| [p.r as i32 * ONE, p.g as i32 * ONE, p.b as i32 * ONE])
        .collect();
    let mut indices = Vec::with_capacity(work.len());

    let divisor = kernel.divisor as i32;
    let last = kernel.entries.len().saturating_sub(1);

    for y in 0..h {
        for x in 0..w {
            let current = work[y * w + x];
            let (idx, chosen) = palette.find_nearest(to_rgb(current));
            indices.push(idx as u16);

            let target = chosen.to_bytes();
            let mut remaining = [0i32; 3];
            for c in 0..3 {
                remaining[c] = current[c] - target[c] as i32 * ONE;
            }
            if remaining == [0, 0, 0] {
                continue;
            }
            let error = remaining;

            for (k, &(dx, dy, weight)) in kernel.entries.iter().enumerate() {
                let mut share = [0i32; 3];
                for c in 0..3 {
                    share[c] = if k == last {
                        remaining[c]
                    } else {
                        error[c] * weight as i32 / divisor
                    };
                    remaining[c] -= share[c];
                }

                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                let neighbor = &mut work[ny as usize * w + nx as usize];
                for c in 0..3 {
                    neighbor[c] = (neighbor[c] + share[c]).clamp(0, CHANNEL_MAX);
                }
            }
        }
    }

    IndexGrid::from_parts(width, height, indices)
}

/// Round a fixed-point sample to the nearest 8-bit color.
#[inline]
fn to_rgb(v: [i32; 3]) -> Rgb {
    let channel = |c: i32| ((c + ONE / 2) >> FRACTION_BITS).clamp(0, 255) as u8;
    Rgb::new(channel(v[0]), channel(v[1]), channel(v[2]))
}

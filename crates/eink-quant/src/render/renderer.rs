//! Resumable byte stream renderer.

use crate::wire::{FrameFormat, WireError};

use super::DisplaySurface;

/// What one render cycle did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Bytes a complete frame has (`width * height`).
    pub expected: usize,
    /// Bytes that mapped to a pixel position, valid or not.
    pub consumed: usize,
    /// Bytes that named no palette entry; their pixel was left as cleared.
    pub invalid_indices: usize,
    /// Bytes received after the last pixel position.
    pub ignored_bytes: usize,
}

impl RenderReport {
    /// Pixels actually painted.
    #[inline]
    pub fn pixels_drawn(&self) -> usize {
        self.consumed - self.invalid_indices
    }

    /// Every pixel position received a byte.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.consumed == self.expected
    }

    /// Pixel positions that never received a byte.
    #[inline]
    pub fn missing(&self) -> usize {
        self.expected - self.consumed
    }

    /// Total bytes received, including ignored ones.
    #[inline]
    pub fn received(&self) -> usize {
        self.consumed + self.ignored_bytes
    }

    /// The stream length differed from the frame size in either direction.
    #[inline]
    pub fn length_mismatch(&self) -> bool {
        !self.is_complete() || self.ignored_bytes > 0
    }
}

/// Draws a frame onto a [`DisplaySurface`] as bytes arrive.
///
/// The cursor survives between [`feed`](Self::feed) calls, so chunk
/// boundaries are invisible in the result: feeding a frame byte by byte and
/// feeding it in one slice draw the same pixels.
///
/// The pen is only re-selected when a byte differs from the active pen.
///
/// # Example
///
/// ```
/// use eink_quant::render::{FrameRenderer, MemorySurface};
/// use eink_quant::wire::FrameFormat;
/// use eink_quant::Palette;
///
/// let format = FrameFormat::new(2, 2, Palette::spectra8()).unwrap();
/// let mut surface = MemorySurface::new(2, 2);
///
/// let mut renderer = FrameRenderer::begin(&mut surface, &format, 1).unwrap();
/// renderer.feed(&[4, 4]);
/// renderer.feed(&[0]);
/// let report = renderer.finish();
///
/// assert!(!report.is_complete());
/// assert_eq!(surface.pixels(), &[4, 4, 0, 1]);
/// assert_eq!(surface.commits(), 1);
/// ```
pub struct FrameRenderer<'a, S: DisplaySurface + ?Sized> {
    surface: &'a mut S,
    width: u32,
    height: u32,
    palette_len: usize,
    x: u32,
    y: u32,
    pen: u8,
    report: RenderReport,
}

impl<'a, S: DisplaySurface + ?Sized> FrameRenderer<'a, S> {
    /// Start a cycle: clear `surface` to `background` once.
    ///
    /// # Errors
    ///
    /// - [`WireError::SurfaceMismatch`] if the surface bounds differ from
    ///   the format; nothing is drawn
    /// - [`WireError::InvalidPen`] if `background` is not a palette index
    pub fn begin(
        surface: &'a mut S,
        format: &FrameFormat,
        background: u8,
    ) -> Result<Self, WireError> {
        let expected = format.dimensions();
        let actual = surface.bounds();
        if actual != expected {
            return Err(WireError::SurfaceMismatch { expected, actual });
        }
        let palette_len = format.palette().len();
        if background as usize >= palette_len {
            return Err(WireError::InvalidPen {
                pen: background,
                palette_len,
            });
        }

        surface.set_pen(background);
        surface.clear();

        Ok(Self {
            surface,
            width: format.width(),
            height: format.height(),
            palette_len,
            x: 0,
            y: 0,
            pen: background,
            report: RenderReport {
                expected: format.byte_len(),
                ..RenderReport::default()
            },
        })
    }

    /// Draw the next chunk of the stream.
    pub fn feed(&mut self, chunk: &[u8]) {
        for (i, &byte) in chunk.iter().enumerate() {
            if self.x >= self.width {
                self.x = 0;
                self.y += 1;
            }
            if self.y >= self.height {
                self.report.ignored_bytes += chunk.len() - i;
                return;
            }

            if byte as usize >= self.palette_len {
                self.report.invalid_indices += 1;
            } else {
                if byte != self.pen {
                    self.surface.set_pen(byte);
                    self.pen = byte;
                }
                self.surface.draw_pixel(self.x, self.y);
            }
            self.report.consumed += 1;
            self.x += 1;
        }
    }

    /// Cursor position of the next byte, before wrapping.
    #[inline]
    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Progress so far.
    #[inline]
    pub fn report(&self) -> RenderReport {
        self.report
    }

    /// End the cycle with exactly one commit, however much was received.
    pub fn finish(self) -> RenderReport {
        self.surface.commit();
        self.report
    }
}

/// Render a whole in-memory stream in one cycle.
pub fn render_frame<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    format: &FrameFormat,
    background: u8,
    bytes: &[u8],
) -> Result<RenderReport, WireError> {
    let mut renderer = FrameRenderer::begin(surface, format, background)?;
    renderer.feed(bytes);
    Ok(renderer.finish())
}

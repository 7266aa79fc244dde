//! Display surface abstraction.

use crate::grid::GridError;
use crate::output::IndexGrid;

/// A pixel-addressable display with an active pen.
///
/// Mirrors the drawing model of small e-ink display drivers: select a pen,
/// draw pixels with it, and push the framebuffer to the panel with
/// [`commit`](DisplaySurface::commit). Pens are palette indices.
pub trait DisplaySurface {
    /// Width and height in pixels.
    fn bounds(&self) -> (u32, u32);

    /// Select the pen used by subsequent draw and clear calls.
    fn set_pen(&mut self, pen: u8);

    /// Paint `(x, y)` with the current pen.
    fn draw_pixel(&mut self, x: u32, y: u32);

    /// Fill the whole surface with the current pen.
    fn clear(&mut self);

    /// Push the framebuffer to the physical output.
    fn commit(&mut self);
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn bounds(&self) -> (u32, u32) {
        (**self).bounds()
    }

    fn set_pen(&mut self, pen: u8) {
        (**self).set_pen(pen)
    }

    fn draw_pixel(&mut self, x: u32, y: u32) {
        (**self).draw_pixel(x, y)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn commit(&mut self) {
        (**self).commit()
    }
}

/// An in-memory surface that records what was drawn.
///
/// Holds one pen index per pixel plus counters for every call, which makes
/// it the reference surface for tests and for host-side previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    pen: u8,
    pixels: Vec<u8>,
    committed: Option<Vec<u8>>,
    commits: usize,
    clears: usize,
    pen_changes: usize,
}

impl MemorySurface {
    /// A surface whose pixels all start as pen 0.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_fill(width, height, 0)
    }

    /// A surface whose pixels all start as `fill`, to tell untouched
    /// pixels apart from drawn ones.
    pub fn with_fill(width: u32, height: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            pen: 0,
            pixels: vec![fill; width as usize * height as usize],
            committed: None,
            commits: 0,
            clears: 0,
            pen_changes: 0,
        }
    }

    /// Current framebuffer contents, one pen per pixel in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Framebuffer contents as of the last commit.
    #[inline]
    pub fn committed(&self) -> Option<&[u8]> {
        self.committed.as_deref()
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    #[inline]
    pub fn pen(&self) -> u8 {
        self.pen
    }

    #[inline]
    pub fn commits(&self) -> usize {
        self.commits
    }

    #[inline]
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Number of `set_pen` calls received.
    #[inline]
    pub fn pen_changes(&self) -> usize {
        self.pen_changes
    }

    /// Framebuffer as an index grid, e.g. for a PNG snapshot.
    pub fn to_index_grid(&self) -> Result<IndexGrid, GridError> {
        IndexGrid::from_bytes(self.width, self.height, &self.pixels)
    }
}

impl DisplaySurface for MemorySurface {
    fn bounds(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_pen(&mut self, pen: u8) {
        self.pen = pen;
        self.pen_changes += 1;
    }

    fn draw_pixel(&mut self, x: u32, y: u32) {
        // drivers ignore off-screen writes
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = self.pen;
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(self.pen);
        self.clears += 1;
    }

    fn commit(&mut self) {
        self.committed = Some(self.pixels.clone());
        self.commits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_uses_current_pen() {
        let mut surface = MemorySurface::new(3, 2);
        surface.set_pen(5);
        surface.draw_pixel(2, 1);
        surface.draw_pixel(9, 9);
        assert_eq!(surface.pixel(2, 1), Some(5));
        assert_eq!(surface.pixel(0, 0), Some(0));
        assert_eq!(surface.pixel(3, 0), None);
    }

    #[test]
    fn test_clear_fills_with_pen() {
        let mut surface = MemorySurface::with_fill(2, 2, 9);
        surface.set_pen(1);
        surface.clear();
        assert_eq!(surface.pixels(), &[1, 1, 1, 1]);
        assert_eq!(surface.clears(), 1);
    }

    #[test]
    fn test_commit_snapshots_framebuffer() {
        let mut surface = MemorySurface::new(2, 1);
        assert_eq!(surface.committed(), None);
        surface.set_pen(3);
        surface.draw_pixel(0, 0);
        surface.commit();
        surface.draw_pixel(1, 0);
        assert_eq!(surface.committed(), Some(&[3, 0][..]));
        assert_eq!(surface.commits(), 1);
    }

    #[test]
    fn test_boxed_surface_forwards() {
        let mut boxed: Box<dyn DisplaySurface> = Box::new(MemorySurface::new(4, 4));
        assert_eq!(boxed.bounds(), (4, 4));
        boxed.set_pen(2);
        boxed.clear();
        boxed.commit();
    }
}

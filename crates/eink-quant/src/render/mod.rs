//! Streaming reconstruction onto a pen-based display surface.
//!
//! The consumer never holds a whole artifact. [`FrameRenderer`] keeps a
//! resumable `(x, y)` cursor, so bytes can be fed in chunks of any size as
//! the transport delivers them. One render cycle is:
//!
//! 1. [`FrameRenderer::begin`] clears the surface to a background pen once
//! 2. [`FrameRenderer::feed`] sets the pen and draws one pixel per byte
//! 3. [`FrameRenderer::finish`] commits exactly once and returns a
//!    [`RenderReport`]
//!
//! The renderer is lenient about stream length: bytes past the last pixel
//! are counted and dropped, and a short stream leaves the rest of the
//! surface at its cleared value.

mod renderer;
mod surface;

pub use renderer::{render_frame, FrameRenderer, RenderReport};
pub use surface::{DisplaySurface, MemorySurface};

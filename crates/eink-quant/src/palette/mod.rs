//! Palette types and nearest-color matching
//!
//! A [`Palette`] is the ordered list of colors a panel can physically show.
//! Its order is part of the wire contract: index `i` in an artifact means
//! `palette.color(i)` on the consumer.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, MAX_PALETTE_SIZE, SPECTRA_8};

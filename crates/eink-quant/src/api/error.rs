//! Unified error type for the eink-quant public API.

use std::fmt;

use crate::dither::ParseDitherModeError;
use crate::grid::GridError;
use crate::palette::{PaletteError, ParseColorError};
use crate::wire::WireError;

/// Unified error type for the eink-quant public API.
///
/// Wraps every error type of the crate into a single enum for convenient
/// `?` propagation in application code.
///
/// # Example
///
/// ```
/// use eink_quant::{Palette, QuantError};
/// use eink_quant::wire::FrameFormat;
///
/// fn format() -> Result<FrameFormat, QuantError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(FrameFormat::new(800, 480, palette)?)
/// }
/// # assert!(format().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantError {
    /// Palette validation error
    Palette(PaletteError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
    /// Unknown dither mode name
    DitherMode(ParseDitherModeError),
    /// Grid buffer does not match its dimensions
    Grid(GridError),
    /// Frame format, encoding or rendering setup error
    Wire(WireError),
}

impl fmt::Display for QuantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantError::Palette(err) => write!(f, "palette error: {}", err),
            QuantError::ParseColor(err) => write!(f, "color parse error: {}", err),
            QuantError::DitherMode(err) => write!(f, "{}", err),
            QuantError::Grid(err) => write!(f, "grid error: {}", err),
            QuantError::Wire(err) => write!(f, "frame error: {}", err),
        }
    }
}

impl std::error::Error for QuantError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantError::Palette(err) => Some(err),
            QuantError::ParseColor(err) => Some(err),
            QuantError::DitherMode(err) => Some(err),
            QuantError::Grid(err) => Some(err),
            QuantError::Wire(err) => Some(err),
        }
    }
}

impl From<PaletteError> for QuantError {
    fn from(err: PaletteError) -> Self {
        QuantError::Palette(err)
    }
}

impl From<ParseColorError> for QuantError {
    fn from(err: ParseColorError) -> Self {
        QuantError::ParseColor(err)
    }
}

impl From<ParseDitherModeError> for QuantError {
    fn from(err: ParseDitherModeError) -> Self {
        QuantError::DitherMode(err)
    }
}

impl From<GridError> for QuantError {
    fn from(err: GridError) -> Self {
        QuantError::Grid(err)
    }
}

impl From<WireError> for QuantError {
    fn from(err: WireError) -> Self {
        QuantError::Wire(err)
    }
}

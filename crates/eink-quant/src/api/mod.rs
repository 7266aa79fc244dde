//! Public API for the eink-quant crate.
//!
//! This module provides the high-level API: [`FrameQuantizer`] builder and
//! [`QuantError`] unified error type.

mod builder;
mod error;

pub use builder::FrameQuantizer;
pub use error::QuantError;

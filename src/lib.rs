//! Inkframe - photo frames on fixed-palette e-ink panels
//!
//! Prepares photographs as byte-per-pixel palette frames, serves them over
//! HTTP and streams them onto a display surface on the consumer side.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;

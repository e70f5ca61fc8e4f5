//! Pixel comparison engine.
//!
//! Compares two RGBA buffers of equal size and reports how many pixels differ,
//! tolerating small spatial offsets when asked to. Image decoding and display
//! live outside this crate: callers hand in raw [`PixelBuffer`]s and get a
//! [`CompareResult`] back, optionally with a green/red composition buffer.

pub mod buffer;
pub mod classify;
pub mod compare;
pub mod delta;
pub mod error;
pub mod options;

pub use self::buffer::{Color, PixelBuffer};
pub use self::classify::classify;
pub use self::compare::{CompareResult, compare};
pub use self::delta::color_delta;
pub use self::error::CompareError;
pub use self::options::CompareOptions;

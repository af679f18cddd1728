//! packing/mod.rs
//! Maps the framed byte stream onto a 2-D pixel grid and back.
//!
//! Layouts:
//! - `Grayscale`: one byte per pixel, row-major, width capped.
//! - `Rgb`: three consecutive bytes per pixel, row-major, width capped.
//! - `RgbInterleaved`: the stream split by position mod 3 into three
//!   channel runs, stored as the three rows of a one-byte-per-pixel grid.
//!
//! Trailing pixels are zero-padded; the decoder never interprets them.

pub mod types;
pub mod interleave;
pub mod pack;

pub use types::*;
pub use interleave::*;
pub use pack::*;

//! compression/constants.rs
//! Backend names and buffer sizes.

pub use crate::constants::compression_ids;

pub const NAME_ZLIB: &str   = "zlib";
pub const NAME_BROTLI: &str = "brotli";
pub const NAME_ZSTD: &str   = "zstd";
pub const NAME_NONE: &str   = "none";

/// Internal buffer size for the brotli reader/writer adapters.
pub const BROTLI_BUFFER_SIZE: usize = 4096;

/// Valid effort ranges.
pub const ZLIB_LEVEL_MAX: u32 = 9;
pub const BROTLI_QUALITY_MAX: u32 = 11;
pub const BROTLI_LG_WINDOW_MIN: u32 = 10;
pub const BROTLI_LG_WINDOW_MAX: u32 = 24;
pub const ZSTD_LEVEL_MIN: i32 = 1;
pub const ZSTD_LEVEL_MAX: i32 = 22;

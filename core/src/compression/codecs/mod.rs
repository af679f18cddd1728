//! compression/codecs/mod.rs
//! Concrete backends behind `CodecBackend`.
//!
//! - `deflate` (zlib wrapper) is always compiled in.
//! - `brotli` and `zstd` are optional cargo features; the registry only
//!   lists what this build carries.

pub mod deflate;
#[cfg(feature = "brotli")]
pub mod brotli;
#[cfg(feature = "zstd")]
pub mod zstd;

pub use deflate::*;
#[cfg(feature = "brotli")]
pub use self::brotli::*;
#[cfg(feature = "zstd")]
pub use self::zstd::*;

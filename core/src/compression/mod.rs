//! compression/mod.rs
//! Body compression for the framed payload.
//!
//! Notes:
//! - The registry maps stable ids to optional backends.
//! - The negotiator tries every candidate and keeps the smallest output.
//! - Decode resolves the recorded id only; formats are never sniffed.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;
pub mod negotiate;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use negotiate::*;

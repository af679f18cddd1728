//! PNG container builder and parser.
//!
//! Responsibilities:
//! - Write signature, IHDR, IDAT and IEND with big-endian lengths and chunk CRCs
//! - Read them back through one forward-only state machine
//! - Inflate the pixel stream within a size bound derived from the config
//!
//! Non-responsibilities:
//! - Row filtering (see `filter`)
//! - The embedded payload header (see `framing`)

pub mod types;
pub mod chunk;
pub mod build;
pub mod parse;

pub use types::{ChunkRef, Metadata, ParseLimits, ParseState, ParsedContainer};
pub use chunk::{read_chunk, write_chunk};
pub use build::{assemble, assemble_with_split, build, encode_ihdr};
pub use parse::{decode_ihdr, inflate_pixels, parse};

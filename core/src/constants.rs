//! constants.rs
//! Wire constants and defaults shared by every stage.
//!
//! Design notes:
//! - Container-level values (signature, chunk tags, IHDR fields) follow the PNG layout.
//! - Payload-level values (header length, ids) are owned by this crate's framing.
//! - Defaults only seed `CodecConfig::default()`; nothing reads them as process-wide state.

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Chunk type tags.
pub mod chunk_tags {
    pub const IHDR: [u8; 4] = *b"IHDR";
    pub const IDAT: [u8; 4] = *b"IDAT";
    pub const IEND: [u8; 4] = *b"IEND";
}

/// IHDR payload length (width, height, depth, color, 3 reserved method bytes).
pub const IHDR_LEN: usize = 13;
/// Only 8-bit samples are written or accepted.
pub const BIT_DEPTH: u8 = 8;

/// Chunk overhead around `data`: length (4) + type (4) + crc (4).
pub const CHUNK_OVERHEAD: usize = 12;

/// Stable compression ids (u8) as recorded in the embedded header.
pub mod compression_ids {
    pub const ZLIB: u8   = 0x00;
    pub const BROTLI: u8 = 0x01;
    pub const ZSTD: u8   = 0x02;
    pub const NONE: u8   = 0xFF;
}

/// Color ids, shared by the embedded header and the IHDR color indicator.
pub mod color_ids {
    pub const GRAYSCALE: u8 = 0x00;
    pub const RGB: u8       = 0x02;
}

/// Default input ceiling (100 MiB).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;
/// Hard ceiling for any configured input size (1 GiB). Keeps the logical
/// length below 2^32, which layout resolution relies on.
pub const MAX_INPUT_SIZE_LIMIT: usize = 1024 * 1024 * 1024;

/// Default grid width cap for the row-major layouts.
pub const DEFAULT_MAX_GRID_WIDTH: u32 = 1024;

/// Default compression efforts.
pub const DEFAULT_LEVEL_ZLIB: u32 = 9;
pub const DEFAULT_QUALITY_BROTLI: u32 = 11;
pub const DEFAULT_LG_WINDOW_BROTLI: u32 = 22;
pub const DEFAULT_LEVEL_ZSTD: i32 = 22;
/// Per-row trial compression is an estimate; a cheaper level is enough.
pub const DEFAULT_FILTER_TRIAL_LEVEL: u32 = 6;
pub const DEFAULT_IDAT_LEVEL: u32 = 9;

/// Rows handed to one worker before the next batch starts.
pub const MIN_ROWS_PER_WORKER: usize = 4;

//! src/compression/codecs/zstd.rs
//!
//! Zstd backend (optional, `zstd` feature).
//!
//! Design notes:
//! - Compression uses the bulk API at the configured level.
//! - Decompression reads a single frame through the streaming decoder so
//!   trailing pixel padding is never parsed as a second frame.

use std::io::Read;

use crate::compression::constants::{NAME_ZSTD, ZSTD_LEVEL_MAX, ZSTD_LEVEL_MIN};
use crate::compression::types::{process_failed, CodecBackend, CompressionError, CompressionId};

pub struct ZstdBackend {
    level: i32,
}

impl ZstdBackend {
    pub fn new(level: i32) -> Self {
        Self { level: level.clamp(ZSTD_LEVEL_MIN, ZSTD_LEVEL_MAX) }
    }
}

impl CodecBackend for ZstdBackend {
    fn id(&self) -> CompressionId {
        CompressionId::Zstd
    }

    fn compress(&self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let compressed = ::zstd::bulk::compress(input, self.level)
            .map_err(|e| process_failed(NAME_ZSTD, e))?;
        out.extend_from_slice(&compressed);
        Ok(())
    }

    fn decompress(&self, input: &[u8], limit: usize, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let decoder = ::zstd::stream::read::Decoder::with_buffer(input)
            .map_err(|e| process_failed(NAME_ZSTD, e))?
            .single_frame();
        decoder.take(limit as u64)
            .read_to_end(out)
            .map_err(|e| process_failed(NAME_ZSTD, e))?;
        Ok(())
    }
}

//! Brotli backend (optional, `brotli` feature).

use std::io::{Read, Write};

use crate::compression::constants::{BROTLI_BUFFER_SIZE, BROTLI_QUALITY_MAX, NAME_BROTLI};
use crate::compression::types::{process_failed, CodecBackend, CompressionError, CompressionId};

pub struct BrotliBackend {
    quality: u32,
    lg_window: u32,
}

impl BrotliBackend {
    pub fn new(quality: u32, lg_window: u32) -> Self {
        Self { quality: quality.min(BROTLI_QUALITY_MAX), lg_window }
    }
}

impl CodecBackend for BrotliBackend {
    fn id(&self) -> CompressionId {
        CompressionId::Brotli
    }

    fn compress(&self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        let mut writer = ::brotli::CompressorWriter::new(
            Vec::with_capacity(input.len() / 2 + 16),
            BROTLI_BUFFER_SIZE,
            self.quality,
            self.lg_window,
        );
        writer.write_all(input).map_err(|e| process_failed(NAME_BROTLI, e))?;
        // into_inner finalizes the stream
        out.extend_from_slice(&writer.into_inner());
        Ok(())
    }

    fn decompress(&self, input: &[u8], limit: usize, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // Reading stops once `limit` bytes arrived, before the reader
        // looks at any padding behind the stream.
        let reader = ::brotli::Decompressor::new(input, BROTLI_BUFFER_SIZE);
        reader.take(limit as u64)
            .read_to_end(out)
            .map_err(|e| process_failed(NAME_BROTLI, e))?;
        Ok(())
    }
}

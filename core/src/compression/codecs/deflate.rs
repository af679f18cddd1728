//! Deflate (zlib wrapper) via flate2.

use std::io::{Read, Write};
use flate2::{Compression, write::ZlibEncoder, read::ZlibDecoder};

use crate::compression::constants::{NAME_ZLIB, ZLIB_LEVEL_MAX};
use crate::compression::types::{process_failed, CodecBackend, CompressionError, CompressionId};

pub struct ZlibBackend {
    level: Compression,
}

impl ZlibBackend {
    pub fn new(level: u32) -> Self {
        Self { level: Compression::new(level.min(ZLIB_LEVEL_MAX)) }
    }

    /// Compressed size only; used by the row filter trials.
    pub fn compressed_len(&self, input: &[u8]) -> Result<usize, CompressionError> {
        let mut out = Vec::with_capacity(input.len() / 2 + 16);
        self.compress(input, &mut out)?;
        Ok(out.len())
    }
}

impl CodecBackend for ZlibBackend {
    fn id(&self) -> CompressionId {
        CompressionId::Zlib
    }

    fn compress(&self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // Encode as one standalone zlib stream appended to `out`
        let mut enc = ZlibEncoder::new(out, self.level);
        enc.write_all(input).map_err(|e| process_failed(NAME_ZLIB, e))?;
        enc.finish().map_err(|e| process_failed(NAME_ZLIB, e))?;
        Ok(())
    }

    fn decompress(&self, input: &[u8], limit: usize, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        // The decoder stops at the end of the zlib stream; `take` bounds output.
        let dec = ZlibDecoder::new(input);
        dec.take(limit as u64)
            .read_to_end(out)
            .map_err(|e| process_failed(NAME_ZLIB, e))?;
        Ok(())
    }
}

/// One-shot zlib helpers for the container's pixel stream.
pub fn zlib_compress(input: &[u8], level: u32) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::with_capacity(input.len() / 2 + 16);
    ZlibBackend::new(level).compress(input, &mut out)?;
    Ok(out)
}

pub fn zlib_decompress(input: &[u8], limit: usize) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::new();
    ZlibBackend::new(0).decompress(input, limit, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_padding_is_ignored() {
        let data = b"hello hello hello hello".to_vec();
        let mut stream = zlib_compress(&data, 9).unwrap();
        stream.extend_from_slice(&[0u8; 17]);
        let back = zlib_decompress(&stream, data.len()).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn limit_caps_output() {
        let data = vec![7u8; 4096];
        let stream = zlib_compress(&data, 6).unwrap();
        let back = zlib_decompress(&stream, 100).unwrap();
        assert_eq!(back.len(), 100);
    }
}

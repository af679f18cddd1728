use byteorder::{BigEndian, ByteOrder};

use crate::compression::codecs::zlib_compress;
use crate::compression::CompressionError;
use crate::constants::{chunk_tags, BIT_DEPTH, IHDR_LEN, PNG_SIGNATURE};
use crate::container::chunk::write_chunk;
use crate::container::types::Metadata;
use crate::filter::FilteredImage;
use crate::packing::PixelGrid;

/// IHDR payload: `width | height | depth | color | compression | filter | interlace`.
pub fn encode_ihdr(m: &Metadata) -> [u8; IHDR_LEN] {
    let mut out = [0u8; IHDR_LEN];
    BigEndian::write_u32(&mut out[0..4], m.width);
    BigEndian::write_u32(&mut out[4..8], m.height);
    out[8] = BIT_DEPTH;
    out[9] = m.color as u8;
    // out[10..13]: compression, filter and interlace methods stay 0
    out
}

/// Signature, IHDR, one IDAT holding `idat`, IEND.
pub fn assemble(metadata: &Metadata, idat: &[u8]) -> Vec<u8> {
    assemble_with_split(metadata, idat, usize::MAX)
}

/// Like `assemble`, cutting the zlib stream into IDAT chunks of at most
/// `max_idat_len` bytes.
pub fn assemble_with_split(metadata: &Metadata, idat: &[u8], max_idat_len: usize) -> Vec<u8> {
    let max_idat_len = max_idat_len.clamp(1, u32::MAX as usize);
    let idat_chunks = idat.len().div_ceil(max_idat_len).max(1);

    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + IHDR_LEN + idat.len() + 12 * idat_chunks);
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, &chunk_tags::IHDR, &encode_ihdr(metadata));
    if idat.is_empty() {
        write_chunk(&mut out, &chunk_tags::IDAT, &[]);
    }
    for part in idat.chunks(max_idat_len) {
        write_chunk(&mut out, &chunk_tags::IDAT, part);
    }
    write_chunk(&mut out, &chunk_tags::IEND, &[]);
    out
}

/// Deflate the filtered scanlines of `grid` at `idat_level` and wrap them.
pub fn build(grid: &PixelGrid, filtered: &FilteredImage, idat_level: u32) -> Result<Vec<u8>, CompressionError> {
    let idat = zlib_compress(&filtered.bytes, idat_level)?;
    Ok(assemble(&Metadata::for_grid(grid), &idat))
}

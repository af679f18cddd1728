use byteorder::{ByteOrder, LittleEndian};

use crate::compression::CompressionId;
use crate::framing::types::{ContainerHeader, FrameError, HeaderFlags, HEADER_LEN};
use crate::packing::ColorMode;

/// Deserialize the fixed 15-byte little-endian header.
///
/// Unknown color modes, compression ids or flag bits are rejected; the
/// codec never guesses.
#[inline]
pub fn decode_header_le(buf: &[u8]) -> Result<ContainerHeader, FrameError> {
    if buf.len() < HEADER_LEN {
        return Err(FrameError::Truncated { have: buf.len(), need: HEADER_LEN });
    }

    let original_length = LittleEndian::read_u64(&buf[0..8]);
    let checksum = LittleEndian::read_u32(&buf[8..12]);

    let color_mode = ColorMode::try_from(buf[12])
        .map_err(|_| FrameError::UnknownColorMode(buf[12]))?;
    let compression_id = CompressionId::try_from(buf[13])
        .map_err(|_| FrameError::UnknownCompression(buf[13]))?;
    let flags = HeaderFlags::from_bits(buf[14])
        .ok_or(FrameError::UnknownFlags(buf[14]))?;

    Ok(ContainerHeader {
        original_length,
        checksum,
        color_mode,
        compression_id,
        flags,
    })
}

/// Split a framed payload into its header and the (possibly padded) body.
pub fn unframe(bytes: &[u8]) -> Result<(ContainerHeader, &[u8]), FrameError> {
    let header = decode_header_le(bytes)?;
    Ok((header, &bytes[HEADER_LEN..]))
}

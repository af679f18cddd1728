use byteorder::{LittleEndian, WriteBytesExt};

use crate::compression::CompressionId;
use crate::framing::types::{ContainerHeader, HeaderFlags, HEADER_LEN};
use crate::packing::ColorMode;
use crate::utils::compute_checksum;

/// Serialize a header into its fixed 15-byte little-endian form.
///
/// Layout:
///
/// ```text
/// [ original_length (8) ]
/// [ checksum (4) ]
/// [ color_mode (1) ]
/// [ compression_id (1) ]
/// [ flags (1) ]
/// ```
pub fn encode_header_le(h: &ContainerHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    let mut cursor = &mut out[..];

    // Writes into a fixed slice of exactly HEADER_LEN bytes cannot fail.
    let _ = cursor.write_u64::<LittleEndian>(h.original_length);
    let _ = cursor.write_u32::<LittleEndian>(h.checksum);
    let _ = cursor.write_u8(h.color_mode as u8);
    let _ = cursor.write_u8(h.compression_id as u8);
    let _ = cursor.write_u8(h.flags.bits());
    debug_assert!(cursor.is_empty(), "encoding wrote incorrect length");

    out
}

/// Build the framed payload `header || body`.
///
/// `logical` is the caller's original payload; the checksum and length
/// are taken from it, never from the delta'd or compressed form.
pub fn frame(
    logical: &[u8],
    body: &[u8],
    color_mode: ColorMode,
    compression_id: CompressionId,
    flags: HeaderFlags,
) -> Vec<u8> {
    let header = ContainerHeader {
        original_length: logical.len() as u64,
        checksum: compute_checksum(logical),
        color_mode,
        compression_id,
        flags,
    };

    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&encode_header_le(&header));
    out.extend_from_slice(body);
    out
}

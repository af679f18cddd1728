use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::constants::CHUNK_OVERHEAD;
use crate::container::types::ChunkRef;
use crate::types::{CodecError, FormatError, IntegrityError};
use crate::utils::chunk_crc;

/// Append `length || tag || data || crc(tag || data)` to `out`.
pub fn write_chunk(out: &mut Vec<u8>, tag: &[u8; 4], data: &[u8]) {
    out.reserve(CHUNK_OVERHEAD + data.len());
    // Writes into a Vec cannot fail.
    let _ = out.write_u32::<BigEndian>(data.len() as u32);
    out.extend_from_slice(tag);
    out.extend_from_slice(data);
    let _ = out.write_u32::<BigEndian>(chunk_crc(tag, data));
}

/// Read the chunk starting at `pos`.
///
/// Returns `Ok(None)` exactly at the end of the input, otherwise the chunk
/// and the offset of the next one. A declared length past the end is a
/// `MalformedChunk`; a CRC mismatch is an integrity failure.
pub fn read_chunk(bytes: &[u8], pos: usize) -> Result<Option<(ChunkRef<'_>, usize)>, CodecError> {
    let rest = bytes.get(pos..).unwrap_or(&[]);
    if rest.is_empty() {
        return Ok(None);
    }
    if rest.len() < 8 {
        // not even room for length and tag
        return Err(FormatError::MalformedChunk { tag: [0; 4], declared: 0, available: rest.len() }.into());
    }

    let declared = BigEndian::read_u32(&rest[0..4]) as usize;
    let mut tag = [0u8; 4];
    tag.copy_from_slice(&rest[4..8]);

    let available = rest.len() - 8;
    if declared.checked_add(4).map_or(true, |need| need > available) {
        return Err(FormatError::MalformedChunk { tag, declared, available }.into());
    }

    let data = &rest[8..8 + declared];
    let stored = BigEndian::read_u32(&rest[8 + declared..12 + declared]);
    let computed = chunk_crc(&tag, data);
    if stored != computed {
        return Err(IntegrityError::ChunkCrc { tag, stored, computed }.into());
    }

    Ok(Some((ChunkRef { tag, data }, pos + CHUNK_OVERHEAD + declared)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::chunk_tags;

    #[test]
    fn iend_is_twelve_fixed_bytes() {
        let mut out = Vec::new();
        write_chunk(&mut out, &chunk_tags::IEND, &[]);
        assert_eq!(out, [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
    }

    #[test]
    fn read_back_and_advance() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"teXt", b"hello");
        write_chunk(&mut out, &chunk_tags::IEND, &[]);

        let (c, next) = read_chunk(&out, 0).unwrap().unwrap();
        assert_eq!(&c.tag, b"teXt");
        assert_eq!(c.data, b"hello");
        let (c, end) = read_chunk(&out, next).unwrap().unwrap();
        assert_eq!(c.tag, chunk_tags::IEND);
        assert!(read_chunk(&out, end).unwrap().is_none());
    }

    #[test]
    fn overlong_length_is_malformed() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"teXt", b"hello");
        out[3] = 200;
        let err = read_chunk(&out, 0).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format(FormatError::MalformedChunk { declared: 200, available: 9, .. })
        ));
    }

    #[test]
    fn flipped_data_bit_fails_crc() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"teXt", b"hello");
        out[9] ^= 0x01;
        assert!(read_chunk(&out, 0).unwrap_err().is_integrity());
    }
}

use byteorder::{BigEndian, ByteOrder};

use crate::compression::codecs::zlib_decompress;
use crate::constants::{chunk_tags, BIT_DEPTH, IHDR_LEN, PNG_SIGNATURE};
use crate::container::chunk::read_chunk;
use crate::container::types::{Metadata, ParseLimits, ParseState, ParsedContainer};
use crate::packing::ColorMode;
use crate::types::{ChunkKind, CodecError, FormatError};
use crate::utils::tag_name;

/// Validate and decode an IHDR payload.
pub fn decode_ihdr(data: &[u8], limits: &ParseLimits) -> Result<Metadata, FormatError> {
    if data.len() != IHDR_LEN {
        return Err(FormatError::BadMetadataLength(data.len()));
    }
    let width = BigEndian::read_u32(&data[0..4]);
    let height = BigEndian::read_u32(&data[4..8]);
    if width == 0 || height == 0 {
        return Err(FormatError::InvalidDimensions { width, height });
    }
    if data[8] != BIT_DEPTH {
        return Err(FormatError::UnsupportedBitDepth(data[8]));
    }
    let color = ColorMode::try_from(data[9]).map_err(|_| FormatError::UnsupportedColor(data[9]))?;
    for (field, value) in [("compression", data[10]), ("filter", data[11]), ("interlace", data[12])] {
        if value != 0 {
            return Err(FormatError::UnsupportedMethod { field, value });
        }
    }

    let metadata = Metadata { width, height, color };
    let bytes = metadata.filtered_len();
    if bytes > limits.max_filtered_bytes {
        return Err(FormatError::ImageTooLarge { bytes, max: limits.max_filtered_bytes });
    }
    Ok(metadata)
}

fn missing_in(state: ParseState) -> ChunkKind {
    match state {
        ParseState::Start | ParseState::ReadSignature | ParseState::ReadMetadata => ChunkKind::Metadata,
        ParseState::ReadData => ChunkKind::Data,
        ParseState::ReadTerminator | ParseState::Done => ChunkKind::Terminator,
    }
}

/// Walk the container once, front to back.
///
/// - IHDR must come first; IDAT before it is a chunk order error
/// - one or more IDAT chunks follow, concatenated in order
/// - unknown chunks are skipped by their declared length
/// - IEND ends parsing; anything after it is ignored
pub fn parse(bytes: &[u8], limits: &ParseLimits) -> Result<ParsedContainer, CodecError> {
    let mut state = ParseState::Start;
    let mut pos = 0usize;
    let mut metadata: Option<Metadata> = None;
    let mut idat = Vec::new();
    let mut chunks = 0usize;
    let mut skipped = Vec::new();

    while state != ParseState::Done {
        state = match state {
            ParseState::Start => ParseState::ReadSignature,

            ParseState::ReadSignature => {
                if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
                    return Err(FormatError::BadSignature.into());
                }
                pos = PNG_SIGNATURE.len();
                ParseState::ReadMetadata
            }

            ParseState::ReadMetadata | ParseState::ReadData | ParseState::ReadTerminator => {
                let Some((chunk, next)) = read_chunk(bytes, pos)? else {
                    return Err(CodecError::MissingChunk(missing_in(state)));
                };
                pos = next;
                chunks += 1;

                match (state, chunk.tag) {
                    (ParseState::ReadMetadata, chunk_tags::IHDR) => {
                        metadata = Some(decode_ihdr(chunk.data, limits)?);
                        ParseState::ReadData
                    }
                    (ParseState::ReadMetadata, chunk_tags::IDAT) => {
                        return Err(FormatError::ChunkOrder {
                            found: chunk.tag,
                            expected: ChunkKind::Metadata,
                        }
                        .into());
                    }
                    (ParseState::ReadMetadata, chunk_tags::IEND) => {
                        return Err(CodecError::MissingChunk(ChunkKind::Metadata));
                    }
                    (_, chunk_tags::IHDR) => {
                        return Err(FormatError::ChunkOrder {
                            found: chunk.tag,
                            expected: missing_in(state),
                        }
                        .into());
                    }
                    (ParseState::ReadData, chunk_tags::IEND) => {
                        return Err(CodecError::MissingChunk(ChunkKind::Data));
                    }
                    (_, chunk_tags::IDAT) => {
                        idat.extend_from_slice(chunk.data);
                        ParseState::ReadTerminator
                    }
                    (_, chunk_tags::IEND) => ParseState::Done,
                    (current, tag) => {
                        log::debug!("parse: skipping {} chunk ({} bytes)", tag_name(&tag), chunk.data.len());
                        skipped.push(tag);
                        current
                    }
                }
            }

            ParseState::Done => ParseState::Done,
        };
    }

    let metadata = metadata.ok_or(CodecError::MissingChunk(ChunkKind::Metadata))?;
    let trailing = bytes.len() - pos;
    if trailing > 0 {
        log::debug!("parse: ignoring {} bytes after IEND", trailing);
    }

    Ok(ParsedContainer { metadata, idat, chunks, skipped, trailing })
}

/// Inflate the concatenated IDAT stream to exactly `filtered_len` bytes.
pub fn inflate_pixels(parsed: &ParsedContainer) -> Result<Vec<u8>, FormatError> {
    let expected = parsed.metadata.filtered_len() as usize;
    let raw = zlib_decompress(&parsed.idat, expected).map_err(|e| FormatError::Inflate(e.to_string()))?;
    if raw.len() != expected {
        return Err(FormatError::PixelStreamLength { expected, actual: raw.len() });
    }
    Ok(raw)
}

use std::fmt;

use crate::{
    compression::{CompressionError, CompressionId},
    config::ConfigError,
    framing::FrameError,
    utils::{enum_name_or_hex, tag_name},
};

/// Mandatory chunk kinds; named in `MissingChunk` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Metadata,
    Data,
    Terminator,
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChunkKind::Metadata   => "IHDR",
            ChunkKind::Data       => "IDAT",
            ChunkKind::Terminator => "IEND",
        };
        f.write_str(name)
    }
}

/// Structural problems: the bytes are not a container this codec can read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    BadSignature,
    MalformedChunk { tag: [u8; 4], declared: usize, available: usize },
    BadMetadataLength(usize),
    InvalidDimensions { width: u32, height: u32 },
    UnsupportedBitDepth(u8),
    UnsupportedColor(u8),
    UnsupportedMethod { field: &'static str, value: u8 },
    ChunkOrder { found: [u8; 4], expected: ChunkKind },
    ImageTooLarge { bytes: u64, max: u64 },
    Inflate(String),
    PixelStreamLength { expected: usize, actual: usize },
    UnknownFilter { row: usize, tag: u8 },
    UnknownColorMode(u8),
    UnknownCompression(u8),
    UnknownFlags(u8),
    LayoutMismatch(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FormatError::*;
        match self {
            BadSignature =>
                write!(f, "bad container signature"),
            MalformedChunk { tag, declared, available } =>
                write!(f, "malformed chunk {}: declared {} bytes, {} available",
                       tag_name(tag), declared, available),
            BadMetadataLength(len) =>
                write!(f, "metadata chunk has length {}, expected 13", len),
            InvalidDimensions { width, height } =>
                write!(f, "invalid image dimensions {}x{}", width, height),
            UnsupportedBitDepth(d) =>
                write!(f, "unsupported bit depth: {}", d),
            UnsupportedColor(c) =>
                write!(f, "unsupported color indicator: {}", c),
            UnsupportedMethod { field, value } =>
                write!(f, "unsupported {} method: {}", field, value),
            ChunkOrder { found, expected } =>
                write!(f, "chunk {} found before {}", tag_name(found), expected),
            ImageTooLarge { bytes, max } =>
                write!(f, "image needs {} raw bytes, limit is {}", bytes, max),
            Inflate(msg) =>
                write!(f, "pixel stream inflate failed: {}", msg),
            PixelStreamLength { expected, actual } =>
                write!(f, "pixel stream length {} != expected {}", actual, expected),
            UnknownFilter { row, tag } =>
                write!(f, "unknown filter type {} on row {}", tag, row),
            UnknownColorMode(raw) =>
                write!(f, "unknown color mode: 0x{:x}", raw),
            UnknownCompression(raw) =>
                write!(f, "unknown compression id: 0x{:x}", raw),
            UnknownFlags(raw) =>
                write!(f, "unknown header flags: 0x{:02x}", raw),
            LayoutMismatch(msg) =>
                write!(f, "layout mismatch: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Corruption: the container parsed, but its contents do not verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    ChunkCrc { tag: [u8; 4], stored: u32, computed: u32 },
    Checksum { stored: u32, computed: u32 },
    LengthMismatch { expected: u64, actual: u64 },
    CorruptBody { codec: &'static str, msg: String },
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use IntegrityError::*;
        match self {
            ChunkCrc { tag, stored, computed } =>
                write!(f, "chunk {} crc mismatch: stored {:08x}, computed {:08x}",
                       tag_name(tag), stored, computed),
            Checksum { stored, computed } =>
                write!(f, "payload checksum mismatch: stored {:08x}, computed {:08x}",
                       stored, computed),
            LengthMismatch { expected, actual } =>
                write!(f, "payload length {} != declared {}", actual, expected),
            CorruptBody { codec, msg } =>
                write!(f, "{} body is corrupt: {}", codec, msg),
        }
    }
}

impl std::error::Error for IntegrityError {}

/// Unified codec error covering framing, container, compression and verification.
/// - `From<T>` impls enable `?` across every stage.
/// - `Integrity` and `UnsupportedCodec` stay distinct so callers can tell
///   corrupt data from a build that lacks a backend.
#[derive(Debug)]
pub enum CodecError {
    /// Structural / format violation. Never retried.
    Format(FormatError),

    /// Fewer bytes than the fixed embedded header.
    TruncatedHeader { have: usize, need: usize },

    /// A mandatory chunk never appeared.
    MissingChunk(ChunkKind),

    /// CRC, checksum or length verification failed. Output must be discarded.
    Integrity(IntegrityError),

    /// Recorded compression id has no backend in this build / registry.
    UnsupportedCodec { compression_id: u8 },

    /// Input exceeds the configured ceiling.
    InputTooLarge { have: usize, max: usize },

    /// Invalid configuration.
    Config(ConfigError),

    /// Encode-side compression failure.
    Compression(CompressionError),

    /// A filter worker thread panicked.
    Worker(String),
}

impl CodecError {
    pub fn is_integrity(&self) -> bool {
        matches!(self, CodecError::Integrity(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(
            self,
            CodecError::Format(_) | CodecError::TruncatedHeader { .. } | CodecError::MissingChunk(_)
        )
    }

    pub fn is_unsupported_codec(&self) -> bool {
        matches!(self, CodecError::UnsupportedCodec { .. })
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Format(e) => write!(f, "format error: {}", e),
            CodecError::TruncatedHeader { have, need } =>
                write!(f, "truncated header: have {} bytes, need {}", have, need),
            CodecError::MissingChunk(kind) => write!(f, "missing mandatory chunk {}", kind),
            CodecError::Integrity(e) => write!(f, "integrity error: {}", e),
            CodecError::UnsupportedCodec { compression_id } =>
                write!(f, "unsupported codec: {}",
                       enum_name_or_hex::<CompressionId>(*compression_id)),
            CodecError::InputTooLarge { have, max } =>
                write!(f, "input too large: {} > {}", have, max),
            CodecError::Config(e) => write!(f, "config error: {}", e),
            CodecError::Compression(e) => write!(f, "compression error: {}", e),
            CodecError::Worker(msg) => write!(f, "worker error: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Format(e) => Some(e),
            CodecError::Integrity(e) => Some(e),
            CodecError::Config(e) => Some(e),
            CodecError::Compression(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FormatError> for CodecError {
    fn from(e: FormatError) -> Self {
        CodecError::Format(e)
    }
}

impl From<IntegrityError> for CodecError {
    fn from(e: IntegrityError) -> Self {
        CodecError::Integrity(e)
    }
}

impl From<ConfigError> for CodecError {
    fn from(e: ConfigError) -> Self {
        CodecError::Config(e)
    }
}

impl From<CompressionError> for CodecError {
    fn from(e: CompressionError) -> Self {
        match e {
            CompressionError::UnsupportedCodec { compression_id } =>
                CodecError::UnsupportedCodec { compression_id },
            other => CodecError::Compression(other),
        }
    }
}

impl From<FrameError> for CodecError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::Truncated { have, need } => CodecError::TruncatedHeader { have, need },
            FrameError::UnknownColorMode(raw) => CodecError::Format(FormatError::UnknownColorMode(raw)),
            FrameError::UnknownCompression(raw) => CodecError::Format(FormatError::UnknownCompression(raw)),
            FrameError::UnknownFlags(raw) => CodecError::Format(FormatError::UnknownFlags(raw)),
        }
    }
}

use std::fmt;
use bitflags::bitflags;

use crate::compression::CompressionId;
use crate::packing::ColorMode;

/// Fixed embedded header size: length(8) + checksum(4) + color(1) + compression(1) + flags(1).
pub const HEADER_LEN: usize = 8 + 4 + 1 + 1 + 1;

bitflags! {
    /// Byte 14 of the embedded header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HeaderFlags: u8 {
        /// Stream was split into channel runs (interleaved RGB layout).
        const INTERLEAVED = 0x01;
        /// Delta pre-filter was applied before compression.
        const DELTA       = 0x02;
    }
}

/// Canonical embedded header (fixed size).
///
/// All fields are little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Logical byte count, before delta and compression.
    pub original_length: u64,
    /// CRC-32 of the logical bytes.
    pub checksum: u32,
    pub color_mode: ColorMode,
    pub compression_id: CompressionId,
    pub flags: HeaderFlags,
}

impl ContainerHeader {
    pub const LEN: usize = HEADER_LEN;

    pub fn interleaved(&self) -> bool {
        self.flags.contains(HeaderFlags::INTERLEAVED)
    }

    pub fn delta(&self) -> bool {
        self.flags.contains(HeaderFlags::DELTA)
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        format!(
            "len={} crc={:08x} color={} compression={} interleaved={} delta={}",
            self.original_length,
            self.checksum,
            self.color_mode,
            self.compression_id,
            self.interleaved(),
            self.delta(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    Truncated { have: usize, need: usize },
    UnknownColorMode(u8),
    UnknownCompression(u8),
    UnknownFlags(u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FrameError::*;
        match self {
            Truncated { have, need } =>
                write!(f, "truncated header: have {}, need {}", have, need),
            UnknownColorMode(v) =>
                write!(f, "unknown color mode: {}", v),
            UnknownCompression(v) =>
                write!(f, "unknown compression id: {}", v),
            UnknownFlags(v) =>
                write!(f, "unknown header flags: 0x{:02x}", v),
        }
    }
}

impl std::error::Error for FrameError {}

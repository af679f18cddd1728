use crate::constants::DEFAULT_MAX_INPUT_SIZE;
use crate::config::CodecConfig;
use crate::framing::HEADER_LEN;
use crate::packing::{ColorMode, PixelGrid};

/// IHDR fields this codec reads and writes. Depth is always 8 and all
/// three method bytes are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub width: u32,
    pub height: u32,
    pub color: ColorMode,
}

impl Metadata {
    pub fn for_grid(grid: &PixelGrid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            color: grid.layout.image_color(),
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.color.bytes_per_pixel()
    }

    pub fn row_len(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Size of the tagged scanline stream, computed without overflow.
    pub fn filtered_len(&self) -> u64 {
        self.height as u64 * (self.width as u64 * self.bytes_per_pixel() as u64 + 1)
    }
}

/// Borrowed view of one chunk; the CRC has already been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRef<'a> {
    pub tag: [u8; 4],
    pub data: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Upper bound on the inflated scanline stream.
    pub max_filtered_bytes: u64,
}

impl ParseLimits {
    /// Bound for a container holding at most `max_input` logical bytes.
    ///
    /// A row never holds more than the framed stream plus pixel padding,
    /// and there is at most one tag byte per framed byte, so three times
    /// the framed size covers every layout.
    pub fn for_input(max_input: usize) -> Self {
        let framed = max_input as u64 + HEADER_LEN as u64;
        Self { max_filtered_bytes: 3 * framed + 3 }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::for_input(config.max_input_size)
    }
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self::for_input(DEFAULT_MAX_INPUT_SIZE)
    }
}

/// Parser position: `Start → ReadSignature → ReadMetadata → ReadData → ReadTerminator → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Start,
    ReadSignature,
    ReadMetadata,
    ReadData,
    ReadTerminator,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContainer {
    pub metadata: Metadata,
    /// Concatenated IDAT payloads (still zlib-compressed).
    pub idat: Vec<u8>,
    /// Chunks read, including skipped ones.
    pub chunks: usize,
    /// Tags of chunks that were skipped.
    pub skipped: Vec<[u8; 4]>,
    /// Bytes following IEND, ignored.
    pub trailing: usize,
}

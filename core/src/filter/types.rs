use std::fmt;
use num_enum::TryFromPrimitive;

use crate::compression::codecs::ZlibBackend;

/// PNG filter type tag, written as the first byte of every filtered row.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive)]
pub enum FilterType {
    None    = 0,
    Sub     = 1,
    Up      = 2,
    Average = 3,
    Paeth   = 4,
}

impl FilterType {
    /// Trial order; ties keep the earlier (lower) id.
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth,
    ];
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterType::None    => "none",
            FilterType::Sub     => "sub",
            FilterType::Up      => "up",
            FilterType::Average => "average",
            FilterType::Paeth   => "paeth",
        };
        f.write_str(name)
    }
}

/// Filtered scanlines ready for the pixel-stream deflate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredImage {
    /// `height × (1 + row_len)` bytes: tag then filtered row.
    pub bytes: Vec<u8>,
    /// Rows per filter type, indexed by tag.
    pub histogram: [u64; 5],
}

/// Scores a candidate row (tag byte included); lower is better.
pub trait SizeEstimator: Sync {
    fn estimate(&self, candidate: &[u8]) -> usize;
}

/// Scores a row by its standalone zlib size.
pub struct DeflateEstimator {
    backend: ZlibBackend,
}

impl DeflateEstimator {
    pub fn new(level: u32) -> Self {
        Self { backend: ZlibBackend::new(level) }
    }
}

impl SizeEstimator for DeflateEstimator {
    fn estimate(&self, candidate: &[u8]) -> usize {
        // An in-memory deflate does not fail; the raw size is a safe score if it does.
        self.backend.compressed_len(candidate).unwrap_or(candidate.len() + 1)
    }
}

/// Minimum sum of absolute differences, the libpng heuristic.
/// Bytes are read as signed deltas; much cheaper than a trial deflate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumAbsEstimator;

impl SizeEstimator for SumAbsEstimator {
    fn estimate(&self, candidate: &[u8]) -> usize {
        candidate
            .iter()
            .skip(1)
            .map(|&b| (b as i8).unsigned_abs() as usize)
            .sum()
    }
}

//! compression/types.rs
//! Stable compression ids, backend trait, and error type.
use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::compression::constants::{compression_ids, NAME_BROTLI, NAME_NONE, NAME_ZLIB, NAME_ZSTD};
use crate::utils::enum_name_or_hex;

/// Compression id recorded in the embedded header.
/// Decode dispatches on this value only; the body format is never sniffed.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionId {
    Zlib   = compression_ids::ZLIB,
    Brotli = compression_ids::BROTLI,
    Zstd   = compression_ids::ZSTD,
    None   = compression_ids::NONE,
}

impl CompressionId {
    pub fn name(self) -> &'static str {
        match self {
            CompressionId::Zlib   => NAME_ZLIB,
            CompressionId::Brotli => NAME_BROTLI,
            CompressionId::Zstd   => NAME_ZSTD,
            CompressionId::None   => NAME_NONE,
        }
    }

    /// Backends this build was compiled with, in negotiation order.
    pub fn compiled_in() -> Vec<CompressionId> {
        let mut ids = vec![CompressionId::Zlib];
        #[cfg(feature = "brotli")]
        ids.push(CompressionId::Brotli);
        #[cfg(feature = "zstd")]
        ids.push(CompressionId::Zstd);
        ids
    }
}

impl fmt::Display for CompressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    UnsupportedCodec { compression_id: u8 },
    CodecProcessFailed { codec: String, msg: String },
    StateError(String),
}

impl From<std::io::Error> for CompressionError {
    fn from(e: std::io::Error) -> Self {
        CompressionError::StateError(e.to_string())
    }
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionError::*;
        match self {
            UnsupportedCodec { compression_id } =>
                write!(f, "unsupported compression codec: {}",
                       enum_name_or_hex::<CompressionId>(*compression_id)),
            CodecProcessFailed { codec, msg } =>
                write!(f, "codec {} process failed: {}", codec, msg),
            StateError(msg) =>
                write!(f, "compression state error: {}", msg),
        }
    }
}

impl std::error::Error for CompressionError {}

/// One general-purpose compression backend.
///
/// - `compress` appends one self-contained stream to `out`.
/// - `decompress` appends at most `limit` bytes to `out`. Input may carry
///   trailing bytes after the stream (pixel padding); they must not be read
///   as another stream.
pub trait CodecBackend: Send + Sync {
    fn id(&self) -> CompressionId;

    fn name(&self) -> &'static str {
        self.id().name()
    }

    fn compress(&self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;

    fn decompress(&self, input: &[u8], limit: usize, out: &mut Vec<u8>) -> Result<(), CompressionError>;
}

pub(crate) fn process_failed(codec: &str, e: impl fmt::Display) -> CompressionError {
    CompressionError::CodecProcessFailed { codec: codec.into(), msg: e.to_string() }
}

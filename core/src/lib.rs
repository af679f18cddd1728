//! pngvault-core
//!
//! Lossless binary-to-PNG container codec.
//! Any byte payload goes in, a standard PNG image comes out, and `decode`
//! returns the exact original bytes or a typed error.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;
pub mod hint;

// Payload stages
pub mod delta;
pub mod compression;
pub mod framing;

// Image stages
pub mod packing;
pub mod filter;
pub mod container;

pub mod telemetry;
pub mod codec;

pub use codec::{
    decode, decode_with_registry, decode_with_telemetry, encode, encode_classified,
    encode_with_registry, encode_with_telemetry,
};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codec::{
        decode, decode_with_registry, decode_with_telemetry, encode, encode_classified,
        encode_with_registry, encode_with_telemetry,
    };
    pub use crate::compression::{CodecBackend, CodecRegistry, CompressionError, CompressionId};
    pub use crate::config::{CodecConfig, ConfigError};
    pub use crate::hint::{FixedKind, PayloadClassifier, PayloadKind};
    pub use crate::packing::{ColorMode, Layout};
    pub use crate::telemetry::{Stage, TelemetrySnapshot};
    pub use crate::types::{ChunkKind, CodecError, FormatError, IntegrityError};
}

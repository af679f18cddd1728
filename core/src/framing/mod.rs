//! Embedded payload framing.
//!
//! Responsibilities:
//! - Define the fixed 15-byte header carried at the front of the pixel stream
//! - Encode `header || body` with the checksum taken over the logical bytes
//! - Decode the header with strict validation
//!
//! Non-responsibilities:
//! - Compression
//! - Pixel layout
//! - Container chunks

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    ContainerHeader,
    FrameError,
    HeaderFlags,
    HEADER_LEN,
};
pub use encode::{encode_header_le, frame};
pub use decode::{decode_header_le, unframe};

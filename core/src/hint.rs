//! hint.rs
//! Caller-supplied description of the payload.
//!
//! The codec never inspects payload content itself. Format sniffing lives
//! outside this crate and reaches the codec through `PayloadClassifier`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Unknown content: negotiate compression, no delta.
    #[default]
    Generic,
    /// Uncompressed sample data (e.g. PCM WAV): delta pre-filter, then negotiate.
    SampleData,
    /// Already entropy-coded (e.g. MP3): stored as-is, no delta.
    EntropyCoded,
}

impl PayloadKind {
    pub fn wants_delta(self) -> bool {
        self == PayloadKind::SampleData
    }
}

/// Classifies a payload before encoding.
pub trait PayloadClassifier {
    fn classify(&self, payload: &[u8]) -> PayloadKind;
}

/// Classifier that always answers the same kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedKind(pub PayloadKind);

impl PayloadClassifier for FixedKind {
    fn classify(&self, _payload: &[u8]) -> PayloadKind {
        self.0
    }
}

impl<F> PayloadClassifier for F
where
    F: Fn(&[u8]) -> PayloadKind,
{
    fn classify(&self, payload: &[u8]) -> PayloadKind {
        self(payload)
    }
}

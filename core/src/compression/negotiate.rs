//! compression/negotiate.rs
//! Pick the smallest body among the registry's candidates.
//!
//! Design notes:
//! - `EntropyCoded` payloads are stored as-is (`CompressionId::None`).
//! - A candidate that is missing or fails is skipped, never fatal.
//! - The stored form wins unless a backend is strictly smaller.
//! - Ties between backends keep the earlier candidate.

use crate::compression::registry::CodecRegistry;
use crate::compression::types::CompressionId;
use crate::hint::PayloadKind;

/// Outcome of one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    Size(usize),
    Unavailable,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub compression_id: CompressionId,
    pub outcome: TrialOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    pub body: Vec<u8>,
    pub compression_id: CompressionId,
    pub trials: Vec<Trial>,
}

pub fn negotiate(bytes: &[u8], kind: PayloadKind, registry: &CodecRegistry) -> Negotiated {
    if kind == PayloadKind::EntropyCoded {
        log::debug!("negotiate: entropy-coded payload ({} bytes), storing uncompressed", bytes.len());
        return Negotiated {
            body: bytes.to_vec(),
            compression_id: CompressionId::None,
            trials: Vec::new(),
        };
    }

    let mut trials = Vec::new();
    let mut best: Option<(CompressionId, Vec<u8>)> = None;

    for (id, backend) in registry.candidates() {
        let Some(backend) = backend else {
            log::debug!("negotiate: backend {} not available, skipped", id);
            trials.push(Trial { compression_id: id, outcome: TrialOutcome::Unavailable });
            continue;
        };

        let mut out = Vec::new();
        match backend.compress(bytes, &mut out) {
            Ok(()) => {
                log::trace!("negotiate: {} -> {} bytes (input {})", id, out.len(), bytes.len());
                trials.push(Trial { compression_id: id, outcome: TrialOutcome::Size(out.len()) });
                let better = match &best {
                    Some((_, current)) => out.len() < current.len(),
                    None => true,
                };
                if better {
                    best = Some((id, out));
                }
            }
            Err(e) => {
                log::debug!("negotiate: backend {} failed, skipped: {}", id, e);
                trials.push(Trial { compression_id: id, outcome: TrialOutcome::Failed(e.to_string()) });
            }
        }
    }

    match best {
        Some((id, body)) if body.len() < bytes.len() => {
            log::debug!("negotiate: selected {} ({} -> {} bytes)", id, bytes.len(), body.len());
            Negotiated { body, compression_id: id, trials }
        }
        _ => {
            log::debug!("negotiate: no backend beat the stored form, using none");
            Negotiated { body: bytes.to_vec(), compression_id: CompressionId::None, trials }
        }
    }
}

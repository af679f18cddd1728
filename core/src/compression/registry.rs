//! compression/registry.rs
//! Capability registry: compression id → optional backend.
//!
//! - Negotiation walks `candidates()`; an id without a backend is skipped.
//! - Decode calls `resolve(id)`; an id without a backend is
//!   `UnsupportedCodec`, never a fallback to another codec.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::compression::codecs::ZlibBackend;
#[cfg(feature = "brotli")]
use crate::compression::codecs::BrotliBackend;
#[cfg(feature = "zstd")]
use crate::compression::codecs::ZstdBackend;
use crate::compression::types::{CodecBackend, CompressionError, CompressionId};
use crate::config::CodecConfig;

pub struct CodecRegistry {
    backends: BTreeMap<CompressionId, Arc<dyn CodecBackend>>,
    candidates: Vec<CompressionId>,
}

impl CodecRegistry {
    /// Registry with no backends at all; everything negotiates to `None`.
    pub fn empty() -> Self {
        Self { backends: BTreeMap::new(), candidates: Vec::new() }
    }

    /// Every backend compiled into this build, at the configured effort.
    /// Negotiation candidates follow `config.codecs`.
    pub fn from_config(config: &CodecConfig) -> Self {
        let mut registry = Self::empty();
        registry.insert(Arc::new(ZlibBackend::new(config.zlib_level)));
        #[cfg(feature = "brotli")]
        registry.insert(Arc::new(BrotliBackend::new(config.brotli_quality, config.brotli_lg_window)));
        #[cfg(feature = "zstd")]
        registry.insert(Arc::new(ZstdBackend::new(config.zstd_level)));

        for id in config.codecs.iter().copied() {
            if id != CompressionId::None && !registry.candidates.contains(&id) {
                registry.candidates.push(id);
            }
        }
        registry
    }

    fn insert(&mut self, backend: Arc<dyn CodecBackend>) {
        self.backends.insert(backend.id(), backend);
    }

    /// Register (or replace) a backend and make it a negotiation candidate.
    pub fn register(&mut self, backend: Arc<dyn CodecBackend>) {
        let id = backend.id();
        if id == CompressionId::None {
            return;
        }
        self.insert(backend);
        if !self.candidates.contains(&id) {
            self.candidates.push(id);
        }
    }

    /// Drop a backend. Its id stays a candidate and is skipped as
    /// unavailable; later decodes of it fail with `UnsupportedCodec`.
    pub fn unregister(&mut self, id: CompressionId) -> Option<Arc<dyn CodecBackend>> {
        self.backends.remove(&id)
    }

    pub fn is_available(&self, id: CompressionId) -> bool {
        self.backends.contains_key(&id)
    }

    pub fn available(&self) -> Vec<CompressionId> {
        self.backends.keys().copied().collect()
    }

    pub fn resolve(&self, id: CompressionId) -> Result<&dyn CodecBackend, CompressionError> {
        self.backends
            .get(&id)
            .map(|b| b.as_ref())
            .ok_or(CompressionError::UnsupportedCodec { compression_id: id as u8 })
    }

    /// Candidate ids in negotiation order, paired with their backend if present.
    pub fn candidates(&self) -> impl Iterator<Item = (CompressionId, Option<&dyn CodecBackend>)> + '_ {
        self.candidates
            .iter()
            .map(move |id| (*id, self.backends.get(id).map(|b| b.as_ref())))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::from_config(&CodecConfig::default())
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("available", &self.available())
            .field("candidates", &self.candidates)
            .finish()
    }
}

//! telemetry/counters.rs
//! Byte and row counters collected while a container is built or read.

use serde::{Deserialize, Serialize};

use crate::compression::CompressionId;

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    /// Caller payload bytes.
    pub bytes_logical: u64,
    /// Compressed (or stored) body bytes.
    pub bytes_body: u64,
    /// Header plus body.
    pub bytes_framed: u64,
    /// Tagged scanline bytes.
    pub bytes_filtered: u64,
    /// Whole container, signature to IEND.
    pub bytes_container: u64,
    pub rows: u64,
    pub chunks: u64,
    /// Rows per filter type, indexed by tag.
    pub filter_histogram: [u64; 5],
    pub compression_id: Option<CompressionId>,
    pub delta: bool,
}

impl TelemetryCounters {
    pub fn record_body(&mut self, logical: usize, body: usize, id: CompressionId, delta: bool) {
        self.bytes_logical = logical as u64;
        self.bytes_body = body as u64;
        self.compression_id = Some(id);
        self.delta = delta;
    }

    pub fn record_filtered(&mut self, filtered: usize, rows: u32, histogram: &[u64; 5]) {
        self.bytes_filtered = filtered as u64;
        self.rows = rows as u64;
        for (slot, n) in self.filter_histogram.iter_mut().zip(histogram) {
            *slot += n;
        }
    }

    /// Container bytes beyond the payload itself; 0 when the container is smaller.
    pub fn overhead_bytes(&self) -> u64 {
        self.bytes_container.saturating_sub(self.bytes_logical)
    }
}

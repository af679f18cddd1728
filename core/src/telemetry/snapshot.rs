//! telemetry/snapshot.rs
//! Immutable, serializable view of one codec call.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::compression::CompressionId;
use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub bytes_logical: u64,
    pub bytes_body: u64,
    pub bytes_framed: u64,
    pub bytes_filtered: u64,
    pub bytes_container: u64,
    pub rows: u64,
    pub chunks: u64,
    pub filter_histogram: [u64; 5],
    pub compression_id: Option<CompressionId>,
    pub delta: bool,
    /// `bytes_body / bytes_logical`; 0 for an empty payload.
    pub compression_ratio: f64,
    /// `bytes_container / bytes_logical`; 0 for an empty payload.
    pub container_ratio: f64,
    pub throughput_logical_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();
        let ratio = |n: u64| {
            if counters.bytes_logical > 0 {
                n as f64 / counters.bytes_logical as f64
            } else {
                0.0
            }
        };
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_logical as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            bytes_logical: counters.bytes_logical,
            bytes_body: counters.bytes_body,
            bytes_framed: counters.bytes_framed,
            bytes_filtered: counters.bytes_filtered,
            bytes_container: counters.bytes_container,
            rows: counters.rows,
            chunks: counters.chunks,
            filter_histogram: counters.filter_histogram,
            compression_id: counters.compression_id,
            delta: counters.delta,
            compression_ratio: ratio(counters.bytes_body),
            container_ratio: ratio(counters.bytes_container),
            throughput_logical_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Internal consistency:
    /// - every row has exactly one filter
    /// - stage times fit in the elapsed time
    pub fn sanity_check(&self) -> bool {
        self.filter_histogram.iter().sum::<u64>() == self.rows
            && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

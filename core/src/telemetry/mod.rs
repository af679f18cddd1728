//! telemetry/mod.rs
//! Counters, stage timers and immutable snapshots for one encode or decode call.
//!
//! Telemetry is opt-in: `encode_with_telemetry` / `decode_with_telemetry`
//! return a `TelemetrySnapshot` next to their normal result.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;

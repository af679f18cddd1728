//! packing/interleave.rs
//! Channel split / merge for the interleaved RGB layout.
//!
//! Stream byte `i` goes to channel `i % 3` at index `i / 3`, so each
//! channel is a contiguous run of every third byte. Channels have equal
//! length `ceil(n / 3)`; missing tail bytes are zero.

use crate::utils::ceil_div;

pub const CHANNELS: usize = 3;

pub fn split_channels(bytes: &[u8]) -> [Vec<u8>; CHANNELS] {
    let len = ceil_div(bytes.len(), CHANNELS);
    let mut channels = [vec![0u8; len], vec![0u8; len], vec![0u8; len]];
    for (i, &b) in bytes.iter().enumerate() {
        channels[i % CHANNELS][i / CHANNELS] = b;
    }
    channels
}

/// Inverse of `split_channels`. Short channels read as zeros; output
/// length is three times the longest channel.
pub fn merge_channels(channels: [&[u8]; CHANNELS]) -> Vec<u8> {
    let len = channels.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(len * CHANNELS);
    for i in 0..len {
        for channel in channels.iter() {
            out.push(channel.get(i).copied().unwrap_or(0));
        }
    }
    out
}

//! packing/pack.rs
//! `pack` / `unpack` between the framed stream and a `PixelGrid`.

use crate::packing::interleave::{merge_channels, split_channels, CHANNELS};
use crate::packing::types::{Layout, PixelGrid};
use crate::utils::ceil_div;

/// Grid dimensions for `len` stream bytes.
///
/// Row-major layouts: `width = min(max_width, pixels)`, `height = ceil(pixels / width)`.
/// Interleaved: `width = ceil(len / 3)`, `height = 3`.
/// Never returns a zero dimension.
pub fn grid_dimensions(len: usize, layout: Layout, max_width: u32) -> (u32, u32) {
    match layout {
        Layout::RgbInterleaved => {
            let width = ceil_div(len, CHANNELS).max(1);
            (width as u32, CHANNELS as u32)
        }
        Layout::Grayscale | Layout::Rgb => {
            let pixels = ceil_div(len, layout.bytes_per_pixel()).max(1);
            let width = pixels.min(max_width.max(1) as usize);
            let height = ceil_div(pixels, width);
            (width as u32, height as u32)
        }
    }
}

pub fn pack(framed: &[u8], layout: Layout, max_width: u32) -> PixelGrid {
    let (width, height) = grid_dimensions(framed.len(), layout, max_width);

    let data = match layout {
        Layout::RgbInterleaved => {
            // channel runs become rows 0, 1, 2
            let [r, g, b] = split_channels(framed);
            let mut data = Vec::with_capacity(width as usize * CHANNELS);
            for channel in [r, g, b] {
                data.extend_from_slice(&channel);
                data.resize(data.len() + (width as usize - channel.len()), 0);
            }
            data
        }
        Layout::Grayscale | Layout::Rgb => {
            let total = width as usize * height as usize * layout.bytes_per_pixel();
            let mut data = Vec::with_capacity(total);
            data.extend_from_slice(framed);
            data.resize(total, 0);
            data
        }
    };

    PixelGrid { width, height, layout, data }
}

pub fn unpack(grid: &PixelGrid) -> Vec<u8> {
    unpack_raw(&grid.data, grid.width, grid.height, grid.layout)
}

/// Structural inverse of `pack` over raw grid bytes.
///
/// A short `data` (final partial row) reads as zeros; nothing past the
/// end of `data` is ever indexed. The result still carries the padding;
/// callers truncate by the embedded length.
pub fn unpack_raw(data: &[u8], width: u32, height: u32, layout: Layout) -> Vec<u8> {
    let width = width as usize;
    match layout {
        Layout::RgbInterleaved => {
            let mut out = merge_channels([
                channel_row(data, width, 0),
                channel_row(data, width, 1),
                channel_row(data, width, 2),
            ]);
            out.resize(width * CHANNELS, 0);
            out
        }
        Layout::Grayscale | Layout::Rgb => {
            let total = width * height as usize * layout.bytes_per_pixel();
            let mut out = data[..total.min(data.len())].to_vec();
            out.resize(total, 0);
            out
        }
    }
}

fn channel_row(data: &[u8], width: usize, c: usize) -> &[u8] {
    let start = (c * width).min(data.len());
    let end = ((c + 1) * width).min(data.len());
    &data[start..end]
}

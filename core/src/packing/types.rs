//! packing/types.rs
//! Color modes, grid layouts and the pixel grid.
use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::constants::color_ids;

/// Color mode; the value doubles as the IHDR color indicator.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Grayscale = color_ids::GRAYSCALE,
    #[default]
    Rgb       = color_ids::RGB,
}

impl ColorMode {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ColorMode::Grayscale => 1,
            ColorMode::Rgb => 3,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Grayscale => f.write_str("grayscale"),
            ColorMode::Rgb => f.write_str("rgb"),
        }
    }
}

/// How bytes are placed in the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    Grayscale,
    Rgb,
    RgbInterleaved,
}

impl Layout {
    /// `None` for grayscale + interleaved: interleaving is an RGB layout.
    pub fn from_parts(color_mode: ColorMode, interleaved: bool) -> Option<Self> {
        match (color_mode, interleaved) {
            (ColorMode::Grayscale, false) => Some(Layout::Grayscale),
            (ColorMode::Grayscale, true) => None,
            (ColorMode::Rgb, false) => Some(Layout::Rgb),
            (ColorMode::Rgb, true) => Some(Layout::RgbInterleaved),
        }
    }

    /// Color mode recorded in the embedded header.
    pub fn color_mode(self) -> ColorMode {
        match self {
            Layout::Grayscale => ColorMode::Grayscale,
            Layout::Rgb | Layout::RgbInterleaved => ColorMode::Rgb,
        }
    }

    /// Color indicator written to IHDR.
    pub fn image_color(self) -> ColorMode {
        match self {
            Layout::Rgb => ColorMode::Rgb,
            Layout::Grayscale | Layout::RgbInterleaved => ColorMode::Grayscale,
        }
    }

    /// Bytes per pixel inside the grid.
    pub fn bytes_per_pixel(self) -> usize {
        self.image_color().bytes_per_pixel()
    }

    pub fn is_interleaved(self) -> bool {
        self == Layout::RgbInterleaved
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Grayscale => f.write_str("grayscale"),
            Layout::Rgb => f.write_str("rgb"),
            Layout::RgbInterleaved => f.write_str("rgb-interleaved"),
        }
    }
}

/// `width × height × bytes_per_pixel` bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: u32,
    pub height: u32,
    pub layout: Layout,
    pub data: Vec<u8>,
}

impl PixelGrid {
    pub fn bytes_per_pixel(&self) -> usize {
        self.layout.bytes_per_pixel()
    }

    /// Bytes in one unfiltered row.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let len = self.row_len();
        &self.data[y * len..(y + 1) * len]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // max(1) keeps chunks() happy for a degenerate zero-width grid
        self.data.chunks(self.row_len().max(1))
    }
}

//! config.rs
//! Per-call codec configuration.
//!
//! `CodecConfig` is plain data passed explicitly to `encode` / `decode`.
//! Missing JSON fields fall back to the defaults in `constants`.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::compression::constants::{
    BROTLI_LG_WINDOW_MAX, BROTLI_LG_WINDOW_MIN, BROTLI_QUALITY_MAX, ZLIB_LEVEL_MAX,
    ZSTD_LEVEL_MAX, ZSTD_LEVEL_MIN,
};
use crate::compression::CompressionId;
use crate::constants::{
    DEFAULT_FILTER_TRIAL_LEVEL, DEFAULT_IDAT_LEVEL, DEFAULT_LEVEL_ZLIB, DEFAULT_LEVEL_ZSTD,
    DEFAULT_LG_WINDOW_BROTLI, DEFAULT_MAX_GRID_WIDTH, DEFAULT_MAX_INPUT_SIZE,
    DEFAULT_QUALITY_BROTLI, MAX_INPUT_SIZE_LIMIT,
};
use crate::packing::{ColorMode, Layout};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Pixel color mode of the produced image.
    pub color_mode: ColorMode,
    /// Split the stream into three channel rows. Requires `Rgb`.
    pub interleaved: bool,
    /// Apply the delta pre-filter to `SampleData` payloads.
    pub delta_for_sample_data: bool,
    /// Largest payload accepted by `encode`; also bounds decoded image size.
    pub max_input_size: usize,
    /// Width cap for the row-major layouts.
    pub max_grid_width: u32,
    /// Negotiation candidates, tried in order.
    pub codecs: Vec<CompressionId>,
    pub zlib_level: u32,
    pub brotli_quality: u32,
    pub brotli_lg_window: u32,
    pub zstd_level: i32,
    /// Deflate level used to score row filter trials.
    pub filter_trial_level: u32,
    /// Deflate level of the final pixel stream.
    pub idat_level: u32,
    /// Filter search threads; 0 picks `num_cpus::get()`.
    pub filter_workers: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Rgb,
            interleaved: false,
            delta_for_sample_data: true,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_grid_width: DEFAULT_MAX_GRID_WIDTH,
            codecs: CompressionId::compiled_in(),
            zlib_level: DEFAULT_LEVEL_ZLIB,
            brotli_quality: DEFAULT_QUALITY_BROTLI,
            brotli_lg_window: DEFAULT_LG_WINDOW_BROTLI,
            zstd_level: DEFAULT_LEVEL_ZSTD,
            filter_trial_level: DEFAULT_FILTER_TRIAL_LEVEL,
            idat_level: DEFAULT_IDAT_LEVEL,
            filter_workers: 1,
        }
    }
}

impl CodecConfig {
    pub fn grayscale() -> Self {
        Self { color_mode: ColorMode::Grayscale, ..Self::default() }
    }

    pub fn rgb_interleaved() -> Self {
        Self { color_mode: ColorMode::Rgb, interleaved: true, ..Self::default() }
    }

    /// Same config with the filter search spread over every core.
    pub fn with_all_cores(self) -> Self {
        Self { filter_workers: 0, ..self }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))
    }

    pub fn layout(&self) -> Result<Layout, ConfigError> {
        Layout::from_parts(self.color_mode, self.interleaved)
            .ok_or(ConfigError::InterleavedGrayscale)
    }

    /// Worker count after resolving `0` to the core count.
    pub fn resolved_workers(&self) -> usize {
        match self.filter_workers {
            0 => num_cpus::get().max(1),
            n => n,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout()?;

        if self.max_input_size == 0 || self.max_input_size > MAX_INPUT_SIZE_LIMIT {
            return Err(ConfigError::MaxInputSize {
                value: self.max_input_size,
                limit: MAX_INPUT_SIZE_LIMIT,
            });
        }
        if self.max_grid_width == 0 {
            return Err(ConfigError::ZeroGridWidth);
        }
        if self.codecs.contains(&CompressionId::None) {
            return Err(ConfigError::NoneAsCandidate);
        }

        check_range("zlib_level", self.zlib_level as i64, 0, ZLIB_LEVEL_MAX as i64)?;
        check_range("filter_trial_level", self.filter_trial_level as i64, 0, ZLIB_LEVEL_MAX as i64)?;
        check_range("idat_level", self.idat_level as i64, 0, ZLIB_LEVEL_MAX as i64)?;
        check_range("brotli_quality", self.brotli_quality as i64, 0, BROTLI_QUALITY_MAX as i64)?;
        check_range(
            "brotli_lg_window",
            self.brotli_lg_window as i64,
            BROTLI_LG_WINDOW_MIN as i64,
            BROTLI_LG_WINDOW_MAX as i64,
        )?;
        check_range("zstd_level", self.zstd_level as i64, ZSTD_LEVEL_MIN as i64, ZSTD_LEVEL_MAX as i64)?;

        Ok(())
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InterleavedGrayscale,
    MaxInputSize { value: usize, limit: usize },
    ZeroGridWidth,
    NoneAsCandidate,
    OutOfRange { field: &'static str, value: i64, min: i64, max: i64 },
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConfigError::*;
        match self {
            InterleavedGrayscale =>
                write!(f, "interleaving requires the rgb color mode"),
            MaxInputSize { value, limit } =>
                write!(f, "max_input_size {} must be in 1..={}", value, limit),
            ZeroGridWidth =>
                write!(f, "max_grid_width must be at least 1"),
            NoneAsCandidate =>
                write!(f, "'none' is always the fallback and cannot be a candidate"),
            OutOfRange { field, value, min, max } =>
                write!(f, "{} = {} is outside {}..={}", field, value, min, max),
            Json(msg) =>
                write!(f, "invalid config json: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

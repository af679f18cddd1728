//! codec.rs
//! Public encode / decode entry points.
//!
//! Encode: delta (sample data only) → negotiate → frame → pack → filter →
//! build (deflate + chunks).
//! Decode: parse → inflate → unfilter → resolve layout and unpack → unframe →
//! decompress → delta reverse → verify.
//!
//! Every call is self-contained; the config and registry are borrowed.

use std::borrow::Cow;

use crate::compression::{negotiate, CodecRegistry, CompressionId};
use crate::config::CodecConfig;
use crate::container::{build, inflate_pixels, parse, Metadata, ParseLimits};
use crate::delta::{delta_decode_in_place, delta_encode};
use crate::filter::{filter_grid, unfilter_image, DeflateEstimator};
use crate::framing::{decode_header_le, frame, unframe, ContainerHeader, HeaderFlags};
use crate::hint::{PayloadClassifier, PayloadKind};
use crate::packing::{pack, unpack_raw, ColorMode, Layout};
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::{CodecError, FormatError, IntegrityError};
use crate::utils::compute_checksum;

// -----------------------------------------------------------------------------
// Encode
// -----------------------------------------------------------------------------

/// Encode `payload` into a PNG container using every backend this build carries.
pub fn encode(payload: &[u8], kind: PayloadKind, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let registry = CodecRegistry::from_config(config);
    encode_with_registry(payload, kind, config, &registry)
}

pub fn encode_with_registry(
    payload: &[u8],
    kind: PayloadKind,
    config: &CodecConfig,
    registry: &CodecRegistry,
) -> Result<Vec<u8>, CodecError> {
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    run_encode(payload, kind, config, registry, &mut counters, &mut timer)
}

/// Encode with the payload kind chosen by `classifier`.
pub fn encode_classified<C>(payload: &[u8], classifier: &C, config: &CodecConfig) -> Result<Vec<u8>, CodecError>
where
    C: PayloadClassifier + ?Sized,
{
    let kind = classifier.classify(payload);
    log::debug!("encode: classifier answered {:?}", kind);
    encode(payload, kind, config)
}

pub fn encode_with_telemetry(
    payload: &[u8],
    kind: PayloadKind,
    config: &CodecConfig,
) -> Result<(Vec<u8>, TelemetrySnapshot), CodecError> {
    let registry = CodecRegistry::from_config(config);
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();

    let png = run_encode(payload, kind, config, &registry, &mut counters, &mut timer)?;
    timer.finish();
    Ok((png, TelemetrySnapshot::from(&counters, &timer)))
}

fn run_encode(
    payload: &[u8],
    kind: PayloadKind,
    config: &CodecConfig,
    registry: &CodecRegistry,
    counters: &mut TelemetryCounters,
    timer: &mut TelemetryTimer,
) -> Result<Vec<u8>, CodecError> {
    config.validate()?;
    let layout = config.layout()?;

    if payload.len() > config.max_input_size {
        return Err(CodecError::InputTooLarge { have: payload.len(), max: config.max_input_size });
    }

    // ---- Delta pre-filter ----
    let delta = kind.wants_delta() && config.delta_for_sample_data;
    let prepared: Cow<'_, [u8]> = if delta {
        Cow::Owned(timer.time(Stage::Delta, || delta_encode(payload)))
    } else {
        Cow::Borrowed(payload)
    };

    // ---- Negotiate ----
    let negotiated = timer.time(Stage::Negotiate, || negotiate(&prepared, kind, registry));
    counters.record_body(payload.len(), negotiated.body.len(), negotiated.compression_id, delta);

    // ---- Frame ----
    let mut flags = HeaderFlags::empty();
    flags.set(HeaderFlags::INTERLEAVED, layout.is_interleaved());
    flags.set(HeaderFlags::DELTA, delta);
    let framed = frame(payload, &negotiated.body, layout.color_mode(), negotiated.compression_id, flags);
    counters.bytes_framed = framed.len() as u64;

    // ---- Pack + filter ----
    let grid = timer.time(Stage::Pack, || pack(&framed, layout, config.max_grid_width));
    let estimator = DeflateEstimator::new(config.filter_trial_level);
    let workers = config.resolved_workers();
    let filtered = timer.time(Stage::Filter, || filter_grid(&grid, &estimator, workers))?;
    counters.record_filtered(filtered.bytes.len(), grid.height, &filtered.histogram);

    // ---- Container ----
    let png = timer.time(Stage::Build, || build(&grid, &filtered, config.idat_level))?;
    counters.chunks = 3;
    counters.bytes_container = png.len() as u64;

    log::debug!(
        "encode: {} bytes, body {} ({} bytes, delta={}), {} grid {}x{}, container {} bytes",
        payload.len(),
        negotiated.compression_id,
        negotiated.body.len(),
        delta,
        layout,
        grid.width,
        grid.height,
        png.len(),
    );
    Ok(png)
}

// -----------------------------------------------------------------------------
// Decode
// -----------------------------------------------------------------------------

/// Decode a container produced by `encode`.
///
/// The layout, compression id and delta flag all come from the container;
/// `config` only supplies size limits and backend settings.
pub fn decode(container: &[u8], config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let registry = CodecRegistry::from_config(config);
    decode_with_registry(container, config, &registry)
}

pub fn decode_with_registry(
    container: &[u8],
    config: &CodecConfig,
    registry: &CodecRegistry,
) -> Result<Vec<u8>, CodecError> {
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    run_decode(container, config, registry, &mut counters, &mut timer)
}

pub fn decode_with_telemetry(
    container: &[u8],
    config: &CodecConfig,
) -> Result<(Vec<u8>, TelemetrySnapshot), CodecError> {
    let registry = CodecRegistry::from_config(config);
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();

    let payload = run_decode(container, config, &registry, &mut counters, &mut timer)?;
    timer.finish();
    Ok((payload, TelemetrySnapshot::from(&counters, &timer)))
}

/// Pick the layout an image was packed with and return its byte stream.
///
/// RGB images are row-major. A three-row grayscale image is read as
/// interleaved only when the de-interleaved stream starts with a header
/// that says so; a plain grayscale header cannot pass that test because
/// byte 4 of its length field (where the interleaved reading finds the
/// color mode) is zero for any accepted size.
pub fn resolve_layout(pixels: &[u8], metadata: &Metadata) -> (Layout, Vec<u8>) {
    let Metadata { width, height, color } = *metadata;
    match color {
        ColorMode::Rgb => (Layout::Rgb, unpack_raw(pixels, width, height, Layout::Rgb)),
        ColorMode::Grayscale => {
            if height == 3 {
                let stream = unpack_raw(pixels, width, height, Layout::RgbInterleaved);
                let interleaved = matches!(
                    decode_header_le(&stream),
                    Ok(h) if h.color_mode == ColorMode::Rgb && h.interleaved()
                );
                if interleaved {
                    return (Layout::RgbInterleaved, stream);
                }
            }
            (Layout::Grayscale, unpack_raw(pixels, width, height, Layout::Grayscale))
        }
    }
}

fn check_layout(header: &ContainerHeader, layout: Layout) -> Result<(), FormatError> {
    if header.color_mode != layout.color_mode() || header.interleaved() != layout.is_interleaved() {
        return Err(FormatError::LayoutMismatch(format!(
            "image is {} but header says color={} interleaved={}",
            layout,
            header.color_mode,
            header.interleaved(),
        )));
    }
    Ok(())
}

fn run_decode(
    container: &[u8],
    config: &CodecConfig,
    registry: &CodecRegistry,
    counters: &mut TelemetryCounters,
    timer: &mut TelemetryTimer,
) -> Result<Vec<u8>, CodecError> {
    config.validate()?;
    counters.bytes_container = container.len() as u64;

    // ---- Container ----
    let limits = ParseLimits::from_config(config);
    let parsed = timer.time(Stage::Parse, || parse(container, &limits))?;
    counters.chunks = parsed.chunks as u64;

    let raw = timer.time(Stage::Inflate, || inflate_pixels(&parsed))?;
    let m = parsed.metadata;
    let pixels = timer.time(Stage::Unfilter, || unfilter_image(&raw, m.width, m.height, m.bytes_per_pixel()))?;

    let mut histogram = [0u64; 5];
    for scanline in raw.chunks_exact(m.row_len() + 1) {
        // tags were validated by unfilter_image
        histogram[scanline[0] as usize] += 1;
    }
    counters.record_filtered(raw.len(), m.height, &histogram);

    // ---- Unpack + unframe ----
    let (layout, stream) = timer.time(Stage::Unpack, || resolve_layout(&pixels, &m));
    counters.bytes_framed = stream.len() as u64;
    let (header, body) = unframe(&stream)?;
    check_layout(&header, layout)?;
    log::debug!("decode: {} {}x{}: {}", layout, m.width, m.height, header.summary());

    let expected = header.original_length;
    if expected > config.max_input_size as u64 {
        return Err(CodecError::InputTooLarge { have: expected as usize, max: config.max_input_size });
    }
    let limit = expected as usize;

    // ---- Decompress ----
    let mut payload = timer.time(Stage::Decompress, || -> Result<Vec<u8>, CodecError> {
        match header.compression_id {
            CompressionId::None => Ok(body[..limit.min(body.len())].to_vec()),
            id => {
                let backend = registry.resolve(id)?;
                let mut out = Vec::with_capacity(limit);
                backend
                    .decompress(body, limit, &mut out)
                    .map_err(|e| IntegrityError::CorruptBody { codec: id.name(), msg: e.to_string() })?;
                Ok(out)
            }
        }
    })?;
    counters.record_body(limit, body.len(), header.compression_id, header.delta());

    if payload.len() as u64 != expected {
        return Err(IntegrityError::LengthMismatch { expected, actual: payload.len() as u64 }.into());
    }

    if header.delta() {
        timer.time(Stage::Delta, || delta_decode_in_place(&mut payload));
    }

    // ---- Verify ----
    let computed = timer.time(Stage::Verify, || compute_checksum(&payload));
    if computed != header.checksum {
        return Err(IntegrityError::Checksum { stored: header.checksum, computed }.into());
    }

    Ok(payload)
}

// Round-trip identity through the public API:
//
// * every layout (grayscale, rgb, interleaved rgb)
// * every payload kind (generic, sample data, entropy coded)
// * the fixed scenarios: empty input, 16 x 0xFF, 300 random bytes interleaved,
//   already-compressed input

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use pngvault_core::codec::resolve_layout;
    use pngvault_core::compression::codecs::ZlibBackend;
    use pngvault_core::container::{inflate_pixels, parse, ParseLimits};
    use pngvault_core::filter::unfilter_image;
    use pngvault_core::framing::{decode_header_le, ContainerHeader};
    use pngvault_core::prelude::*;
    use pngvault_core::utils::compute_checksum;
    use pngvault_core::constants::PNG_SIGNATURE;

    fn fast_config(base: CodecConfig) -> CodecConfig {
        CodecConfig {
            zlib_level: 6,
            brotli_quality: 5,
            zstd_level: 3,
            idat_level: 6,
            filter_trial_level: 1,
            ..base
        }
    }

    fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen()).collect()
    }

    /// Walk the container by hand and return the embedded header.
    fn embedded_header(png: &[u8]) -> ContainerHeader {
        let parsed = parse(png, &ParseLimits::default()).unwrap();
        let raw = inflate_pixels(&parsed).unwrap();
        let m = parsed.metadata;
        let pixels = unfilter_image(&raw, m.width, m.height, m.bytes_per_pixel()).unwrap();
        let (_, stream) = resolve_layout(&pixels, &m);
        decode_header_le(&stream).unwrap()
    }

    /// Zlib underneath, any id on top; counts every call.
    struct CountingBackend {
        id: CompressionId,
        inner: ZlibBackend,
        compress_calls: Arc<AtomicUsize>,
        decompress_calls: Arc<AtomicUsize>,
    }

    impl CodecBackend for CountingBackend {
        fn id(&self) -> CompressionId {
            self.id
        }

        fn compress(&self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
            self.compress_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.compress(input, out)
        }

        fn decompress(&self, input: &[u8], limit: usize, out: &mut Vec<u8>) -> Result<(), CompressionError> {
            self.decompress_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.decompress(input, limit, out)
        }
    }

    fn counting_registry() -> (CodecRegistry, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let compress_calls = Arc::new(AtomicUsize::new(0));
        let decompress_calls = Arc::new(AtomicUsize::new(0));
        let mut registry = CodecRegistry::empty();
        for id in [CompressionId::Zlib, CompressionId::Brotli, CompressionId::Zstd] {
            registry.register(Arc::new(CountingBackend {
                id,
                inner: ZlibBackend::new(6),
                compress_calls: compress_calls.clone(),
                decompress_calls: decompress_calls.clone(),
            }));
        }
        (registry, compress_calls, decompress_calls)
    }

// # ✅ Scenario A: empty input

    #[test]
    fn empty_payload_roundtrips() {
        for config in [CodecConfig::grayscale(), CodecConfig::default(), CodecConfig::rgb_interleaved()] {
            let png = encode(&[], PayloadKind::Generic, &config).unwrap();
            assert_eq!(&png[..8], &PNG_SIGNATURE);

            let header = embedded_header(&png);
            assert_eq!(header.original_length, 0);
            assert_eq!(header.checksum, 0);

            let out = decode(&png, &config).unwrap();
            assert!(out.is_empty());
        }
    }

// # ✅ Scenario B: 16 x 0xFF, grayscale, delta off

    #[test]
    fn sixteen_ff_grayscale() {
        let config = CodecConfig { delta_for_sample_data: false, ..CodecConfig::grayscale() };
        let payload = [0xFFu8; 16];

        let png = encode(&payload, PayloadKind::Generic, &config).unwrap();
        let header = embedded_header(&png);
        assert_eq!(header.color_mode, ColorMode::Grayscale);
        assert!(!header.interleaved());
        assert!(!header.delta());

        assert_eq!(decode(&png, &config).unwrap(), payload);
    }

// # ✅ Scenario C: 300 random bytes, interleaved RGB

    #[test]
    fn three_hundred_random_interleaved() {
        let config = CodecConfig { delta_for_sample_data: false, ..CodecConfig::rgb_interleaved() };
        let payload = random_bytes(0xC0FFEE, 300);

        let png = encode(&payload, PayloadKind::Generic, &config).unwrap();
        let header = embedded_header(&png);
        assert_eq!(header.original_length, 300);
        assert_eq!(header.checksum, compute_checksum(&payload));
        assert_eq!(header.color_mode, ColorMode::Rgb);
        assert!(header.interleaved());

        assert_eq!(decode(&png, &config).unwrap(), payload);
    }

// # ✅ Scenario D: already compressed input

    #[test]
    fn entropy_coded_is_stored_and_never_decompressed() {
        let config = CodecConfig::default();
        let (registry, compress_calls, decompress_calls) = counting_registry();
        // Highly compressible on purpose: the hint alone must force "none".
        let payload = vec![0x41u8; 4096];

        let png = encode_with_registry(&payload, PayloadKind::EntropyCoded, &config, &registry).unwrap();
        assert_eq!(embedded_header(&png).compression_id, CompressionId::None);
        assert_eq!(compress_calls.load(Ordering::SeqCst), 0);

        let out = decode_with_registry(&png, &config, &registry).unwrap();
        assert_eq!(out, payload);
        assert_eq!(decompress_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn incompressible_generic_falls_back_to_none() {
        let config = CodecConfig::default();
        let (registry, compress_calls, decompress_calls) = counting_registry();
        let payload = random_bytes(7, 2048);

        let png = encode_with_registry(&payload, PayloadKind::Generic, &config, &registry).unwrap();
        assert_eq!(compress_calls.load(Ordering::SeqCst), 3);
        assert_eq!(embedded_header(&png).compression_id, CompressionId::None);

        assert_eq!(decode_with_registry(&png, &config, &registry).unwrap(), payload);
        assert_eq!(decompress_calls.load(Ordering::SeqCst), 0);
    }

// # ✅ Delta pre-filter is recorded and reversed

    #[test]
    fn sample_data_sets_delta_flag() {
        let config = fast_config(CodecConfig::default());
        let ramp: Vec<u8> = (0..5000u32).map(|i| (i * 7 / 3) as u8).collect();

        let png = encode(&ramp, PayloadKind::SampleData, &config).unwrap();
        let header = embedded_header(&png);
        assert!(header.delta());
        assert_ne!(header.compression_id, CompressionId::None);
        assert_eq!(decode(&png, &config).unwrap(), ramp);

        let no_delta = CodecConfig { delta_for_sample_data: false, ..config.clone() };
        let png = encode(&ramp, PayloadKind::SampleData, &no_delta).unwrap();
        assert!(!embedded_header(&png).delta());
        // decode only follows the flag, whatever the decoder's config says
        assert_eq!(decode(&png, &config).unwrap(), ramp);
    }

    #[test]
    fn entropy_coded_never_gets_delta() {
        let config = CodecConfig::default();
        let png = encode(&[1, 2, 3, 4, 5], PayloadKind::EntropyCoded, &config).unwrap();
        assert!(!embedded_header(&png).delta());
    }

// # ✅ Classifier hook

    #[test]
    fn classifier_chooses_kind() {
        let config = CodecConfig::default();
        let payload = vec![9u8; 1000];

        let stored = encode_classified(&payload, &FixedKind(PayloadKind::EntropyCoded), &config).unwrap();
        assert_eq!(embedded_header(&stored).compression_id, CompressionId::None);

        let by_magic = |b: &[u8]| {
            if b.starts_with(b"ID3") { PayloadKind::EntropyCoded } else { PayloadKind::Generic }
        };
        let compressed = encode_classified(&payload, &by_magic, &config).unwrap();
        assert_ne!(embedded_header(&compressed).compression_id, CompressionId::None);
        assert_eq!(decode(&compressed, &config).unwrap(), payload);
    }

// # ✅ Larger buffers, multi-row grids, parallel filter search

    #[test]
    fn large_random_buffer_all_layouts() {
        let payload = random_bytes(42, 64 * 1024 + 5);
        for base in [CodecConfig::grayscale(), CodecConfig::default(), CodecConfig::rgb_interleaved()] {
            let config = fast_config(base).with_all_cores();
            let png = encode(&payload, PayloadKind::Generic, &config).unwrap();
            assert_eq!(decode(&png, &config).unwrap(), payload);
        }
    }

    #[test]
    fn three_row_grayscale_is_not_mistaken_for_interleaved() {
        // 5 payload bytes + 15 header bytes = 20 bytes -> 8x3 grayscale grid
        let config = CodecConfig { max_grid_width: 8, ..CodecConfig::grayscale() };
        let payload = [0x02u8, 0x01, 0x02, 0x01, 0x02];
        let png = encode(&payload, PayloadKind::EntropyCoded, &config).unwrap();

        let parsed = parse(&png, &ParseLimits::default()).unwrap();
        assert_eq!((parsed.metadata.width, parsed.metadata.height), (8, 3));
        assert_eq!(decode(&png, &config).unwrap(), payload);
    }

    #[test]
    fn input_above_ceiling_is_rejected() {
        let config = CodecConfig { max_input_size: 100, ..CodecConfig::default() };
        let err = encode(&[0u8; 101], PayloadKind::Generic, &config).unwrap_err();
        assert!(matches!(err, CodecError::InputTooLarge { have: 101, max: 100 }));
    }

    fn layouts() -> impl Strategy<Value = CodecConfig> {
        prop_oneof![
            Just(CodecConfig::grayscale()),
            Just(CodecConfig::default()),
            Just(CodecConfig::rgb_interleaved()),
        ]
    }

    fn kinds() -> impl Strategy<Value = PayloadKind> {
        prop_oneof![
            Just(PayloadKind::Generic),
            Just(PayloadKind::SampleData),
            Just(PayloadKind::EntropyCoded),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_roundtrip_identity(
            payload in proptest::collection::vec(any::<u8>(), 0..1500),
            base in layouts(),
            kind in kinds(),
            max_grid_width in 1u32..48,
        ) {
            let config = CodecConfig { max_grid_width, ..fast_config(base) };
            let png = encode(&payload, kind, &config).unwrap();
            let out = decode(&png, &config).unwrap();
            prop_assert_eq!(out, payload);
        }
    }
}

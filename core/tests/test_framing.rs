// Embedded header tests:
//
// * `encode_header_le` / `decode_header_le`
// * `frame` / `unframe`
// * rejection of truncated input and unknown enum values

#[cfg(test)]
mod tests {
    use pngvault_core::compression::CompressionId;
    use pngvault_core::framing::{
        decode_header_le, encode_header_le, frame, unframe, ContainerHeader, FrameError, HeaderFlags,
        HEADER_LEN,
    };
    use pngvault_core::packing::ColorMode;
    use pngvault_core::types::{CodecError, FormatError};
    use pngvault_core::utils::compute_checksum;

    fn sample_header() -> ContainerHeader {
        ContainerHeader {
            original_length: 0x0102_0304,
            checksum: 0xDEAD_BEEF,
            color_mode: ColorMode::Rgb,
            compression_id: CompressionId::Brotli,
            flags: HeaderFlags::INTERLEAVED | HeaderFlags::DELTA,
        }
    }

// # ✅ 1. Wire layout is fixed little-endian

    #[test]
    fn header_wire_layout() {
        let wire = encode_header_le(&sample_header());
        assert_eq!(wire.len(), HEADER_LEN);
        assert_eq!(
            wire,
            [
                0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0, // original_length
                0xEF, 0xBE, 0xAD, 0xDE, // checksum
                2,    // rgb
                1,    // brotli
                0x03, // interleaved | delta
            ]
        );
        assert_eq!(decode_header_le(&wire).unwrap(), sample_header());
    }

// # ✅ 2. frame() checksums the logical bytes, not the body

    #[test]
    fn frame_uses_logical_checksum() {
        let logical = b"logical payload";
        let body = b"compressed?";
        let framed = frame(logical, body, ColorMode::Grayscale, CompressionId::Zlib, HeaderFlags::empty());

        let (header, rest) = unframe(&framed).unwrap();
        assert_eq!(header.original_length, logical.len() as u64);
        assert_eq!(header.checksum, compute_checksum(logical));
        assert_eq!(header.color_mode, ColorMode::Grayscale);
        assert_eq!(header.compression_id, CompressionId::Zlib);
        assert!(!header.interleaved() && !header.delta());
        assert_eq!(rest, body);
    }

    #[test]
    fn unframe_keeps_trailing_padding() {
        let mut framed = frame(b"", b"", ColorMode::Rgb, CompressionId::None, HeaderFlags::empty());
        framed.extend_from_slice(&[0, 0]);
        let (_, body) = unframe(&framed).unwrap();
        assert_eq!(body, &[0, 0]);
    }

// # ❌ 3. Truncated input

    #[test]
    fn truncated_header_is_rejected() {
        for len in [0, 1, HEADER_LEN - 1] {
            let buf = vec![0u8; len];
            assert_eq!(
                decode_header_le(&buf).unwrap_err(),
                FrameError::Truncated { have: len, need: HEADER_LEN }
            );
        }

        let err: CodecError = unframe(&[0u8; 7]).unwrap_err().into();
        assert!(matches!(err, CodecError::TruncatedHeader { have: 7, need: 15 }));
    }

// # ❌ 4. Unknown enum values

    #[test]
    fn unknown_color_mode_is_rejected() {
        let mut wire = encode_header_le(&sample_header());
        wire[12] = 1;
        assert_eq!(decode_header_le(&wire).unwrap_err(), FrameError::UnknownColorMode(1));
    }

    #[test]
    fn unknown_compression_is_rejected() {
        let mut wire = encode_header_le(&sample_header());
        wire[13] = 9;
        assert_eq!(decode_header_le(&wire).unwrap_err(), FrameError::UnknownCompression(9));

        let err: CodecError = FrameError::UnknownCompression(9).into();
        assert!(matches!(err, CodecError::Format(FormatError::UnknownCompression(9))));
    }

    #[test]
    fn unknown_flag_bits_are_rejected() {
        let mut wire = encode_header_le(&sample_header());
        wire[14] = 0x80;
        assert_eq!(decode_header_le(&wire).unwrap_err(), FrameError::UnknownFlags(0x80));
    }
}

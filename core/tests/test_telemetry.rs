#[cfg(test)]
mod telemetry_snapshot_tests {
    use std::time::Duration;

    use pngvault_core::prelude::*;
    use pngvault_core::telemetry::{StageTimes, TelemetryCounters, TelemetryTimer};

    fn payload() -> Vec<u8> {
        (0..20_000u32).map(|i| ((i / 7) % 251) as u8).collect()
    }

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        timer.add_stage_time(Stage::Pack, Duration::from_micros(5));
        timer.add_stage_time(Stage::Filter, Duration::from_micros(10));
        std::thread::sleep(Duration::from_millis(2)); // elapsed must exceed stage times
        timer.finish();
        timer
    }

    #[test]
    fn encode_records_every_encode_stage() {
        let (png, snapshot) = encode_with_telemetry(&payload(), PayloadKind::SampleData, &CodecConfig::default()).unwrap();

        assert!(snapshot.has_all_stages(&Stage::ENCODE));
        assert!(snapshot.stage_times.contains(Stage::Delta));
        assert!(snapshot.delta);
        assert_eq!(snapshot.bytes_logical, 20_000);
        assert_eq!(snapshot.bytes_container, png.len() as u64);
        assert_eq!(snapshot.bytes_framed, snapshot.bytes_body + 15);
        assert_eq!(snapshot.chunks, 3);
        assert!(snapshot.compression_ratio < 1.0);
        assert!(snapshot.sanity_check());
    }

    #[test]
    fn decode_records_every_decode_stage() {
        let config = CodecConfig::default();
        let (png, enc) = encode_with_telemetry(&payload(), PayloadKind::Generic, &config).unwrap();
        let (out, dec) = decode_with_telemetry(&png, &config).unwrap();

        assert_eq!(out, payload());
        assert!(dec.has_all_stages(&Stage::DECODE));
        assert!(!dec.stage_times.contains(Stage::Delta));
        assert_eq!(dec.compression_id, enc.compression_id);
        assert_eq!(dec.rows, enc.rows);
        assert_eq!(dec.filter_histogram, enc.filter_histogram);
        assert_eq!(dec.bytes_filtered, enc.bytes_filtered);
        assert!(dec.sanity_check());
    }

    #[test]
    fn empty_payload_has_zero_ratios() {
        let (_, snapshot) = encode_with_telemetry(&[], PayloadKind::Generic, &CodecConfig::default()).unwrap();
        assert_eq!(snapshot.compression_ratio, 0.0);
        assert_eq!(snapshot.container_ratio, 0.0);
        assert_eq!(snapshot.compression_id, Some(CompressionId::None));
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Inflate, Duration::from_micros(3));
        times.add(Stage::Inflate, Duration::from_micros(4));
        assert_eq!(times.get(Stage::Inflate), Duration::from_micros(7));
        assert_eq!(times.get(Stage::Verify), Duration::ZERO);
        assert_eq!(times.total(), Duration::from_micros(7));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let counters = TelemetryCounters { bytes_logical: 100, bytes_body: 40, rows: 2, filter_histogram: [1, 1, 0, 0, 0], ..Default::default() };
        let snapshot = TelemetrySnapshot::from(&counters, &make_timer());
        assert!((snapshot.compression_ratio - 0.4).abs() < 1e-9);
        assert!(snapshot.sanity_check());

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"Filter\""));
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use pngvault_core::delta::{delta_decode, delta_decode_in_place, delta_encode, delta_encode_in_place};

    #[test]
    fn empty_and_single_byte() {
        assert_eq!(delta_decode(&delta_encode(&[])), Vec::<u8>::new());
        assert_eq!(delta_decode(&delta_encode(&[0x80])), vec![0x80]);
    }

    #[test]
    fn wraps_mod_256() {
        assert_eq!(delta_encode(&[0, 255, 0]), vec![0, 255, 1]);
        assert_eq!(delta_decode(&[255, 2]), vec![255, 1]);
    }

    proptest! {
        #[test]
        fn prop_delta_inverse(bytes in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let encoded = delta_encode(&bytes);
            prop_assert_eq!(encoded.len(), bytes.len());
            prop_assert_eq!(delta_decode(&encoded), bytes.clone());

            let mut buf = bytes.clone();
            delta_encode_in_place(&mut buf);
            prop_assert_eq!(&buf, &encoded);
            delta_decode_in_place(&mut buf);
            prop_assert_eq!(buf, bytes);
        }
    }
}

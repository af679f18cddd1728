//! delta.rs
//! Byte-wise delta pre-filter (mod 256).
//!
//! `out[0] = in[0]`, `out[i] = in[i] - in[i-1]`; decode is the running sum.
//! Length is preserved; inputs of length 0 or 1 come back unchanged.

pub fn delta_encode(input: &[u8]) -> Vec<u8> {
    let mut out = input.to_vec();
    delta_encode_in_place(&mut out);
    out
}

pub fn delta_decode(input: &[u8]) -> Vec<u8> {
    let mut out = input.to_vec();
    delta_decode_in_place(&mut out);
    out
}

pub fn delta_encode_in_place(buf: &mut [u8]) {
    // Walk backwards so every predecessor is still the original byte.
    for i in (1..buf.len()).rev() {
        buf[i] = buf[i].wrapping_sub(buf[i - 1]);
    }
}

pub fn delta_decode_in_place(buf: &mut [u8]) {
    for i in 1..buf.len() {
        buf[i] = buf[i].wrapping_add(buf[i - 1]);
    }
}

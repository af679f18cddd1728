use crate::filter::types::FilterType;
use crate::types::FormatError;

/// Paeth predictor; ties resolve left, then up, then up-left.
#[inline]
pub fn paeth_predictor(left: u8, up: u8, up_left: u8) -> u8 {
    let p = left as i16 + up as i16 - up_left as i16;
    let pa = (p - left as i16).abs();
    let pb = (p - up as i16).abs();
    let pc = (p - up_left as i16).abs();
    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        up
    } else {
        up_left
    }
}

/// Left, up and up-left of byte `i`, one byte apart whatever the pixel size.
#[inline]
fn neighbours(row: &[u8], prev: Option<&[u8]>, i: usize) -> (u8, u8, u8) {
    let left = if i > 0 { row[i - 1] } else { 0 };
    let (up, up_left) = match prev {
        Some(p) => (p[i], if i > 0 { p[i - 1] } else { 0 }),
        None => (0, 0),
    };
    (left, up, up_left)
}

/// Append `row` filtered with `kind` to `out`.
///
/// `prev` is the original (unfiltered) previous row, `None` for row 0.
/// Predictors work on raw bytes, so an RGB row's left neighbour is the
/// previous channel byte, not the previous pixel. Missing neighbours read as 0.
pub fn filter_row(kind: FilterType, row: &[u8], prev: Option<&[u8]>, out: &mut Vec<u8>) {
    out.reserve(row.len());
    for i in 0..row.len() {
        let x = row[i];
        let (a, b, c) = neighbours(row, prev, i);
        let filtered = match kind {
            FilterType::None => x,
            FilterType::Sub => x.wrapping_sub(a),
            FilterType::Up => x.wrapping_sub(b),
            FilterType::Average => x.wrapping_sub(((a as u16 + b as u16) / 2) as u8),
            FilterType::Paeth => x.wrapping_sub(paeth_predictor(a, b, c)),
        };
        out.push(filtered);
    }
}

/// Reverse `filter_row` in place. `prev` is the already reconstructed row.
pub fn unfilter_row(kind: FilterType, row: &mut [u8], prev: Option<&[u8]>) {
    for i in 0..row.len() {
        // left reads the reconstructed byte written on an earlier iteration
        let (a, b, c) = neighbours(row, prev, i);
        row[i] = match kind {
            FilterType::None => row[i],
            FilterType::Sub => row[i].wrapping_add(a),
            FilterType::Up => row[i].wrapping_add(b),
            FilterType::Average => row[i].wrapping_add(((a as u16 + b as u16) / 2) as u8),
            FilterType::Paeth => row[i].wrapping_add(paeth_predictor(a, b, c)),
        };
    }
}

/// Reconstruct raw rows from `height` tagged scanlines of
/// `width × bytes_per_pixel` bytes.
pub fn unfilter_image(bytes: &[u8], width: u32, height: u32, bytes_per_pixel: usize) -> Result<Vec<u8>, FormatError> {
    let row_len = width as usize * bytes_per_pixel;
    let height = height as usize;
    let expected = height * (row_len + 1);
    if bytes.len() != expected {
        return Err(FormatError::PixelStreamLength { expected, actual: bytes.len() });
    }

    let mut out = vec![0u8; height * row_len];
    for (y, scanline) in bytes.chunks_exact(row_len + 1).enumerate() {
        let kind = FilterType::try_from(scanline[0])
            .map_err(|_| FormatError::UnknownFilter { row: y, tag: scanline[0] })?;

        let (done, rest) = out.split_at_mut(y * row_len);
        let row = &mut rest[..row_len];
        row.copy_from_slice(&scanline[1..]);

        let prev = if y == 0 { None } else { Some(&done[(y - 1) * row_len..]) };
        unfilter_row(kind, row, prev);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paeth_tie_prefers_left_then_up() {
        // p = a + b - c; all distances equal when a == b == c
        assert_eq!(paeth_predictor(7, 7, 7), 7);
        // a=1,b=3,c=2 -> p=2, pa=1 pb=1 pc=0 -> up_left
        assert_eq!(paeth_predictor(1, 3, 2), 2);
        // a=3,b=1,c=1 -> p=3, pa=0 -> left
        assert_eq!(paeth_predictor(3, 1, 1), 3);
        // a=1,b=3,c=1 -> p=3, pa=2 pb=0 -> up
        assert_eq!(paeth_predictor(1, 3, 1), 3);
        // a=4,b=6,c=0 -> p=10, pa=6 pb=4 pc=10 -> up
        assert_eq!(paeth_predictor(4, 6, 0), 6);
    }

    #[test]
    fn sub_takes_the_previous_byte() {
        let mut out = Vec::new();
        filter_row(FilterType::Sub, &[10, 20, 30, 40], None, &mut out);
        assert_eq!(out, vec![10, 10, 10, 10]);
    }

    #[test]
    fn paeth_up_left_is_one_byte_back() {
        // byte 1: a=7, b=20, c=10 -> p=17, pa=10 pb=3 pc=7 -> up
        // byte 2: a=9, b=30, c=20 -> p=19, pa=10 pb=11 pc=1 -> up_left
        let prev = [10u8, 20, 30];
        let row = [7u8, 9, 25];
        let mut out = Vec::new();
        filter_row(FilterType::Paeth, &row, Some(prev.as_slice()), &mut out);
        assert_eq!(out, vec![7u8.wrapping_sub(10), 9u8.wrapping_sub(20), 5]);
    }

    #[test]
    fn first_row_sees_zero_above() {
        let row = [5u8, 9, 200];
        for kind in FilterType::ALL {
            let mut out = Vec::new();
            filter_row(kind, &row, None, &mut out);
            let mut back = out.clone();
            unfilter_row(kind, &mut back, None);
            assert_eq!(back, row, "{kind}");
        }
        let mut up = Vec::new();
        filter_row(FilterType::Up, &row, None, &mut up);
        assert_eq!(up, row);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = unfilter_image(&[0, 1, 7, 1], 1, 2, 1).unwrap_err();
        assert_eq!(err, FormatError::UnknownFilter { row: 1, tag: 7 });
    }

    #[test]
    fn short_stream_is_rejected() {
        let err = unfilter_image(&[0, 1, 2], 2, 2, 1).unwrap_err();
        assert_eq!(err, FormatError::PixelStreamLength { expected: 6, actual: 3 });
    }
}

use std::any::Any;
use std::ops::Range;

use crate::constants::MIN_ROWS_PER_WORKER;
use crate::filter::apply::filter_row;
use crate::filter::types::{FilterType, FilteredImage, SizeEstimator};
use crate::packing::PixelGrid;
use crate::types::CodecError;
use crate::utils::ceil_div;

/// Try all five filters on one row and keep the cheapest.
///
/// Returns the winning type and the filtered bytes (without the tag).
pub fn best_filter<E>(row: &[u8], prev: Option<&[u8]>, estimator: &E) -> (FilterType, Vec<u8>)
where
    E: SizeEstimator + ?Sized,
{
    let mut candidate = Vec::with_capacity(row.len() + 1);
    let mut best: Option<(FilterType, usize, Vec<u8>)> = None;

    for kind in FilterType::ALL {
        candidate.clear();
        candidate.push(kind as u8);
        filter_row(kind, row, prev, &mut candidate);
        let score = estimator.estimate(&candidate);

        let better = match &best {
            Some((_, best_score, _)) => score < *best_score,
            None => true,
        };
        if better {
            best = Some((kind, score, candidate[1..].to_vec()));
        }
    }

    match best {
        Some((kind, _, bytes)) => (kind, bytes),
        // FilterType::ALL is never empty
        None => (FilterType::None, row.to_vec()),
    }
}

fn filter_range<E>(grid: &PixelGrid, rows: Range<usize>, estimator: &E) -> Vec<(FilterType, Vec<u8>)>
where
    E: SizeEstimator + ?Sized,
{
    rows.map(|y| {
        let prev = if y == 0 { None } else { Some(grid.row(y - 1)) };
        best_filter(grid.row(y), prev, estimator)
    })
    .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "filter worker panicked".to_string()
    }
}

/// Filter every row of `grid`.
///
/// With `workers > 1` the rows are cut into contiguous ranges, one per
/// scoped thread, and stitched back in row order.
pub fn filter_grid<E>(grid: &PixelGrid, estimator: &E, workers: usize) -> Result<FilteredImage, CodecError>
where
    E: SizeEstimator + ?Sized,
{
    let height = grid.height as usize;
    let workers = workers.clamp(1, (height / MIN_ROWS_PER_WORKER).max(1));

    let choices: Vec<(FilterType, Vec<u8>)> = if workers == 1 {
        filter_range(grid, 0..height, estimator)
    } else {
        let per_worker = ceil_div(height, workers);
        log::debug!("filter: {} rows over {} workers ({} rows each)", height, workers, per_worker);

        let parts = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = (0..height)
                .step_by(per_worker)
                .map(|start| {
                    let end = (start + per_worker).min(height);
                    scope.spawn(move |_| filter_range(grid, start..end, estimator))
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().map_err(|p| CodecError::Worker(panic_message(p.as_ref()))))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|p| CodecError::Worker(panic_message(p.as_ref())))??;

        parts.into_iter().flatten().collect()
    };

    let mut bytes = Vec::with_capacity(height * (grid.row_len() + 1));
    let mut histogram = [0u64; 5];
    for (kind, row) in choices {
        histogram[kind as usize] += 1;
        bytes.push(kind as u8);
        bytes.extend_from_slice(&row);
    }

    log::trace!("filter: histogram {:?}", histogram);
    Ok(FilteredImage { bytes, histogram })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::SumAbsEstimator;
    use crate::packing::Layout;

    #[test]
    fn constant_ramp_picks_sub() {
        let row: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(3)).collect();
        let (kind, bytes) = best_filter(&row, None, &SumAbsEstimator);
        assert_eq!(kind, FilterType::Sub);
        assert!(bytes[1..].iter().all(|&b| b == 3));
    }

    #[test]
    fn ties_keep_lowest_id() {
        // All-zero rows score 0 under every filter
        let row = [0u8; 16];
        let (kind, _) = best_filter(&row, Some(&row[..]), &SumAbsEstimator);
        assert_eq!(kind, FilterType::None);
    }

    #[test]
    fn repeated_rows_pick_up() {
        let row: Vec<u8> = (0..32u8).map(|i| i.wrapping_mul(97)).collect();
        let (kind, bytes) = best_filter(&row, Some(row.as_slice()), &SumAbsEstimator);
        assert_eq!(kind, FilterType::Up);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn histogram_counts_rows() {
        let grid = PixelGrid {
            width: 4,
            height: 3,
            layout: Layout::Grayscale,
            data: vec![0; 12],
        };
        let img = filter_grid(&grid, &SumAbsEstimator, 1).unwrap();
        assert_eq!(img.bytes.len(), 3 * 5);
        assert_eq!(img.histogram.iter().sum::<u64>(), 3);
    }
}

//! Row filter optimizer.
//!
//! Responsibilities:
//! - The five PNG row filters and their inverses
//! - Greedy per-row choice of the filter with the smallest estimated size
//! - Optional fan-out of the row search over scoped worker threads
//!
//! Row N is always filtered against the *original* row N-1, so each row's
//! choice is independent and the parallel search is byte-identical to the
//! sequential one.

pub mod types;
pub mod apply;
pub mod optimizer;

pub use types::{
    DeflateEstimator,
    FilterType,
    FilteredImage,
    SizeEstimator,
    SumAbsEstimator,
};
pub use apply::{filter_row, paeth_predictor, unfilter_image, unfilter_row};
pub use optimizer::{best_filter, filter_grid};

mod loss_fn;
mod naive;
mod vectorized;

use ndarray::{Array2, ArrayView1, Axis};

pub use loss_fn::{Naive, SoftmaxLoss, Vectorized};
pub use naive::softmax_loss_naive;
pub use vectorized::softmax_loss_vectorized;

/// Returns the largest entry of `row`, `-inf` when empty.
pub(crate) fn row_max(row: ArrayView1<f64>) -> f64 {
    row.fold(f64::NEG_INFINITY, |acc, &s| acc.max(s))
}

/// Subtracts each row's maximum from every entry of that row.
///
/// Softmax is invariant to this shift and it keeps `exp` from overflowing.
pub(crate) fn shift_rows(scores: &mut Array2<f64>) {
    let max = scores.map_axis(Axis(1), row_max);
    *scores -= &max.insert_axis(Axis(1));
}

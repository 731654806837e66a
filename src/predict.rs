use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::{Result, loss::shift_rows, validate::check_product};

/// Computes the class scores `x · w`.
///
/// # Errors
/// `LossErr::SizeMismatch` if the columns of `x` don't match the rows of `w`, and
/// `LossErr::NoClasses` if `w` has no columns.
pub fn scores(w: ArrayView2<f64>, x: ArrayView2<f64>) -> Result<Array2<f64>> {
    check_product(w, x)?;
    Ok(x.dot(&w))
}

/// Computes the softmax probability of every class for every row of `x`.
///
/// Each row of the result sums to one.
pub fn softmax_probs(w: ArrayView2<f64>, x: ArrayView2<f64>) -> Result<Array2<f64>> {
    let mut probs = scores(w, x)?;
    shift_rows(&mut probs);
    probs.mapv_inplace(f64::exp);

    let sums = probs.sum_axis(Axis(1));
    probs /= &sums.insert_axis(Axis(1));
    Ok(probs)
}

/// Predicts the highest scoring class of every row of `x`, the lowest index on ties.
pub fn predict(w: ArrayView2<f64>, x: ArrayView2<f64>) -> Result<Array1<usize>> {
    let scores = scores(w, x)?;
    let labels = scores.map_axis(Axis(1), |row| {
        let mut best = 0;
        for (j, &s) in row.iter().enumerate() {
            if s > row[best] {
                best = j;
            }
        }
        best
    });

    Ok(labels)
}

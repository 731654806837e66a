use log::{debug, trace};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Zip, linalg};

use super::shift_rows;
use crate::{Result, validate::check_inputs};

/// Softmax loss, computed over the whole batch with matrix products.
///
/// Takes the same arguments and returns the same values as
/// [`softmax_loss_naive`](super::softmax_loss_naive), within floating point tolerance.
///
/// # Errors
/// Any shape, label or regularization problem reported by [`check_inputs`].
pub fn softmax_loss_vectorized(
    w: ArrayView2<f64>,
    x: ArrayView2<f64>,
    y: ArrayView1<usize>,
    reg: f64,
) -> Result<(f64, Array2<f64>)> {
    let dims = check_inputs(w, x, y, reg)?;
    let n = dims.n as f64;
    debug!(
        "vectorized softmax loss: n={} d={} c={} reg={reg}",
        dims.n, dims.d, dims.c
    );

    let mut scores = x.dot(&w);
    shift_rows(&mut scores);

    let mut probs = scores.mapv(f64::exp);
    let sum_exp = probs.sum_axis(Axis(1));
    let correct = Zip::from(scores.rows()).and(&y).map_collect(|s, &l| s[l]);

    let data_loss = (sum_exp.mapv(f64::ln) - correct).sum() / n;
    let loss = data_loss + reg * (&w * &w).sum();

    probs /= &sum_exp.insert_axis(Axis(1));
    Zip::from(probs.rows_mut())
        .and(&y)
        .for_each(|mut p, &l| p[l] -= 1.0);

    let mut dw = &w * (2.0 * reg);
    linalg::general_mat_mul(1.0 / n, &x.t(), &probs, 1.0, &mut dw);

    trace!("vectorized softmax loss = {loss}");
    Ok((loss, dw))
}

use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::row_max;
use crate::{Result, validate::check_inputs};

/// Softmax loss, computed one example and one class at a time.
///
/// # Arguments
/// * `w` - The weights, `(d, c)`.
/// * `x` - The batch, `(n, d)`.
/// * `y` - The labels, `(n,)`, each in `[0, c)`.
/// * `reg` - The L2 regularization strength.
///
/// # Returns
/// The mean cross-entropy plus `reg * sum(w^2)`, and its gradient with respect to `w`.
///
/// # Errors
/// Any shape, label or regularization problem reported by [`check_inputs`].
pub fn softmax_loss_naive(
    w: ArrayView2<f64>,
    x: ArrayView2<f64>,
    y: ArrayView1<usize>,
    reg: f64,
) -> Result<(f64, Array2<f64>)> {
    let dims = check_inputs(w, x, y, reg)?;
    let (n, c) = (dims.n, dims.c);
    debug!("naive softmax loss: n={n} d={} c={c} reg={reg}", dims.d);

    let mut loss = 0.0;
    let mut dw = Array2::<f64>::zeros(w.dim());
    let mut exp_scores = Array1::<f64>::zeros(c);

    for i in 0..n {
        let xi = x.row(i);
        let scores = xi.dot(&w);
        let max = row_max(scores.view());

        let mut sum_exp = 0.0;
        for j in 0..c {
            exp_scores[j] = (scores[j] - max).exp();
            sum_exp += exp_scores[j];
        }

        loss += sum_exp.ln() - (scores[y[i]] - max);

        for j in 0..c {
            let mut coef = exp_scores[j] / sum_exp;
            if j == y[i] {
                coef -= 1.0;
            }

            dw.column_mut(j).scaled_add(coef, &xi);
        }
    }

    let mut penalty = 0.0;
    for &wij in w.iter() {
        penalty += wij * wij;
    }

    let loss = loss / n as f64 + reg * penalty;
    dw /= n as f64;
    dw.scaled_add(2.0 * reg, &w);

    trace!("naive softmax loss = {loss}");
    Ok((loss, dw))
}

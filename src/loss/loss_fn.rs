use ndarray::{Array2, ArrayView1, ArrayView2};

use super::{softmax_loss_naive, softmax_loss_vectorized};
use crate::Result;

/// A strategy for computing the softmax cross-entropy loss of a linear classifier and its
/// gradient with respect to the weights.
pub trait SoftmaxLoss: Send + Sync {
    /// Computes the loss and `dW` for the given batch.
    ///
    /// # Arguments
    /// * `w` - The weights, `(d, c)`.
    /// * `x` - The batch, `(n, d)`.
    /// * `y` - The labels, `(n,)`, each in `[0, c)`.
    /// * `reg` - The L2 regularization strength.
    ///
    /// # Returns
    /// The loss and a gradient shaped like `w`, or an error if the inputs are invalid.
    fn loss(
        &self,
        w: ArrayView2<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<usize>,
        reg: f64,
    ) -> Result<(f64, Array2<f64>)>;
}

/// Loop-based reference strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct Naive;

/// Batched strategy built on matrix products.
#[derive(Debug, Default, Clone, Copy)]
pub struct Vectorized;

impl SoftmaxLoss for Naive {
    fn loss(
        &self,
        w: ArrayView2<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<usize>,
        reg: f64,
    ) -> Result<(f64, Array2<f64>)> {
        softmax_loss_naive(w, x, y, reg)
    }
}

impl SoftmaxLoss for Vectorized {
    fn loss(
        &self,
        w: ArrayView2<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<usize>,
        reg: f64,
    ) -> Result<(f64, Array2<f64>)> {
        softmax_loss_vectorized(w, x, y, reg)
    }
}

//! Softmax cross-entropy loss and gradient for a linear classifier.
//!
//! A linear classifier scores a batch `x` of shape `(n, d)` with weights `w` of shape
//! `(d, c)`. The loss is the mean negative log-probability the softmax of those scores
//! assigns to the true labels, plus an L2 penalty `reg * sum(w^2)`.
//!
//! Two interchangeable computations are provided:
//! - [`softmax_loss_naive`]: explicit loops over examples and classes.
//! - [`softmax_loss_vectorized`]: whole-batch matrix products.
//!
//! Both shift scores by their row maximum before exponentiating and both validate their
//! inputs, returning a [`LossErr`] instead of indexing out of bounds.
//!
//! ```rust
//! use ndarray::{Array2, array};
//! use softmax_classifier::softmax_loss_vectorized;
//!
//! # fn main() -> softmax_classifier::Result<()> {
//! let w = Array2::<f64>::zeros((3, 2));
//! let x = array![[1.0, 2.0, 3.0]];
//! let y = array![0];
//!
//! let (loss, dw) = softmax_loss_vectorized(w.view(), x.view(), y.view(), 0.0)?;
//! assert!((loss - 2f64.ln()).abs() < 1e-12);
//! assert_eq!(dw.column(0), array![-0.5, -1.0, -1.5]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gradient_check;
pub mod loss;
pub mod predict;
pub mod validate;

pub use config::{LossConfig, LossStrategy};
pub use error::{LossErr, Result};
pub use loss::{Naive, SoftmaxLoss, Vectorized, softmax_loss_naive, softmax_loss_vectorized};
pub use predict::{predict, scores, softmax_probs};

//! Finite difference checks of analytic gradients.
//!
//! The checkers take the loss as a closure of the weights only, so a batch and a
//! regularization strength are usually captured:
//!
//! ```rust
//! use ndarray::array;
//! use softmax_classifier::{gradient_check::numerical_gradient, softmax_loss_vectorized};
//!
//! # fn main() -> softmax_classifier::Result<()> {
//! let w = array![[0.1, -0.2], [0.3, 0.05]];
//! let x = array![[1.0, 2.0], [-0.5, 0.5]];
//! let y = array![1, 0];
//!
//! let numeric = numerical_gradient(
//!     |w| softmax_loss_vectorized(w, x.view(), y.view(), 0.1).map(|(loss, _)| loss),
//!     w.view(),
//!     1e-5,
//! )?;
//! let (_, analytic) = softmax_loss_vectorized(w.view(), x.view(), y.view(), 0.1)?;
//! assert!((&numeric - &analytic).iter().all(|d| d.abs() < 1e-6));
//! # Ok(())
//! # }
//! ```

use log::{debug, warn};
use ndarray::{Array2, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{LossErr, Result};

/// The outcome of checking a single gradient entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheck {
    /// `(row, column)` of the checked entry.
    pub index: (usize, usize),
    pub numeric: f64,
    pub analytic: f64,
    pub rel_error: f64,
}

/// Returns `|a - b| / (|a| + |b|)`, or zero when both are zero.
pub fn relative_error(a: f64, b: f64) -> f64 {
    let denom = a.abs() + b.abs();
    if denom == 0.0 {
        return 0.0;
    }

    (a - b).abs() / denom
}

fn check_step(h: f64) -> Result<()> {
    if !(h > 0.0) {
        return Err(LossErr::InvalidStep(h));
    }

    Ok(())
}

/// Centered difference `(f(w + h e) - f(w - h e)) / 2h` of a single entry.
fn centered_diff<F>(f: &mut F, w: &mut Array2<f64>, index: (usize, usize), h: f64) -> Result<f64>
where
    F: FnMut(ArrayView2<f64>) -> Result<f64>,
{
    let old = w[index];

    w[index] = old + h;
    let plus = f(w.view());

    w[index] = old - h;
    let minus = f(w.view());

    w[index] = old;
    Ok((plus? - minus?) / (2.0 * h))
}

/// Numerically estimates the gradient of `f` at `w` entry by entry.
///
/// # Arguments
/// * `f` - The function to differentiate.
/// * `w` - The point of evaluation.
/// * `h` - The finite difference step.
///
/// # Returns
/// An array shaped like `w`, or the first error `f` produced.
pub fn numerical_gradient<F>(mut f: F, w: ArrayView2<f64>, h: f64) -> Result<Array2<f64>>
where
    F: FnMut(ArrayView2<f64>) -> Result<f64>,
{
    check_step(h)?;

    let mut probe = w.to_owned();
    let mut grad = Array2::<f64>::zeros(w.dim());

    for (index, g) in grad.indexed_iter_mut() {
        *g = centered_diff(&mut f, &mut probe, index, h)?;
    }

    Ok(grad)
}

/// Compares `analytic` against numeric estimates at `num_checks` random entries of `w`.
///
/// # Arguments
/// * `f` - The function whose gradient `analytic` claims to be.
/// * `w` - The point of evaluation.
/// * `analytic` - The gradient under test, shaped like `w`.
/// * `num_checks` - How many entries to sample, with replacement.
/// * `h` - The finite difference step.
/// * `rng` - The source of sampled indices.
///
/// # Returns
/// One [`GradCheck`] per sampled entry, empty if `w` has no entries.
pub fn grad_check_sparse<F, R>(
    mut f: F,
    w: ArrayView2<f64>,
    analytic: ArrayView2<f64>,
    num_checks: usize,
    h: f64,
    rng: &mut R,
) -> Result<Vec<GradCheck>>
where
    F: FnMut(ArrayView2<f64>) -> Result<f64>,
    R: Rng,
{
    check_step(h)?;

    if analytic.dim() != w.dim() {
        let (got, expected) = if analytic.nrows() != w.nrows() {
            (analytic.nrows(), w.nrows())
        } else {
            (analytic.ncols(), w.ncols())
        };

        return Err(LossErr::SizeMismatch {
            a: "analytic gradient",
            b: "w",
            got,
            expected,
        });
    }

    if w.is_empty() {
        return Ok(Vec::new());
    }

    let (rows, cols) = w.dim();
    let mut probe = w.to_owned();
    let mut checks = Vec::with_capacity(num_checks);

    for _ in 0..num_checks {
        let index = (rng.random_range(0..rows), rng.random_range(0..cols));
        let numeric = centered_diff(&mut f, &mut probe, index, h)?;
        let analytic = analytic[index];
        let rel_error = relative_error(numeric, analytic);

        debug!("{index:?}: numerical {numeric:.6} analytic {analytic:.6}, relative error {rel_error:e}");
        checks.push(GradCheck {
            index,
            numeric,
            analytic,
            rel_error,
        });
    }

    Ok(checks)
}

/// Settings for [`GradCheckConfig::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradCheckConfig {
    pub num_checks: usize,
    pub h: f64,
    /// Relative errors above this are reported.
    pub threshold: f64,
    /// Seed for the sampled indices, drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        Self {
            num_checks: 10,
            h: 1e-5,
            threshold: 1e-5,
            seed: None,
        }
    }
}

impl GradCheckConfig {
    /// Runs [`grad_check_sparse`] with these settings.
    ///
    /// # Returns
    /// Every check, including the ones above `threshold`, which are also logged.
    pub fn run<F>(
        &self,
        f: F,
        w: ArrayView2<f64>,
        analytic: ArrayView2<f64>,
    ) -> Result<Vec<GradCheck>>
    where
        F: FnMut(ArrayView2<f64>) -> Result<f64>,
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let checks = grad_check_sparse(f, w, analytic, self.num_checks, self.h, &mut rng)?;
        for check in checks.iter().filter(|c| c.rel_error > self.threshold) {
            warn!(
                "gradient mismatch at {:?}: numerical {} analytic {}, relative error {:e}",
                check.index, check.numeric, check.analytic, check.rel_error
            );
        }

        Ok(checks)
    }

    /// Returns whether every check is within `threshold`.
    pub fn passed(&self, checks: &[GradCheck]) -> bool {
        checks.iter().all(|c| c.rel_error <= self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    fn quadratic(w: ArrayView2<f64>) -> Result<f64> {
        Ok(w.iter().map(|v| v * v).sum::<f64>() + 3.0 * w[[0, 1]])
    }

    #[test]
    fn test_relative_error() {
        assert_eq!(relative_error(0.0, 0.0), 0.0);
        assert_eq!(relative_error(1.0, -1.0), 1.0);
        assert_relative_eq!(relative_error(1.0, 1.5), 0.2);
    }

    #[test]
    fn test_numerical_gradient_of_quadratic() {
        let w = array![[1.0, -2.0], [0.5, 4.0]];
        let grad = numerical_gradient(quadratic, w.view(), 1e-5).unwrap();

        let expected = array![[2.0, -1.0], [1.0, 8.0]];
        assert_relative_eq!(grad, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_numerical_gradient_probes_one_entry_at_a_time() {
        let w = array![[1.0, -2.0], [0.5, 4.0]];
        let mut seen = Vec::new();

        numerical_gradient(
            |w| {
                seen.push(w.to_owned());
                quadratic(w)
            },
            w.view(),
            1e-3,
        )
        .unwrap();

        // each entry is probed up then down, never two at once
        assert_eq!(seen.len(), 8);
        for probe in &seen {
            let moved = (probe - &w).iter().filter(|d| d.abs() > 0.0).count();
            assert_eq!(moved, 1);
        }
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let w = array![[1.0]];
        assert_eq!(
            numerical_gradient(quadratic, w.view(), 0.0).unwrap_err(),
            LossErr::InvalidStep(0.0)
        );

        let mut rng = StdRng::seed_from_u64(0);
        let err = grad_check_sparse(quadratic, w.view(), w.view(), 1, -1e-5, &mut rng).unwrap_err();
        assert_eq!(err, LossErr::InvalidStep(-1e-5));
    }

    #[test]
    fn test_sparse_check_rejects_gradient_shape() {
        let w = array![[1.0, 2.0]];
        let analytic = array![[1.0], [2.0]];
        let mut rng = StdRng::seed_from_u64(0);

        let err =
            grad_check_sparse(quadratic, w.view(), analytic.view(), 3, 1e-5, &mut rng).unwrap_err();
        assert_eq!(
            err,
            LossErr::SizeMismatch {
                a: "analytic gradient",
                b: "w",
                got: 2,
                expected: 1
            }
        );
    }

    #[test]
    fn test_sparse_check_flags_wrong_gradient() {
        let w = array![[1.0, -2.0], [0.5, 4.0]];
        let right = array![[2.0, -1.0], [1.0, 8.0]];
        let wrong = &right * 1.5;
        let cfg = GradCheckConfig {
            num_checks: 20,
            seed: Some(7),
            ..Default::default()
        };

        let checks = cfg.run(quadratic, w.view(), right.view()).unwrap();
        assert_eq!(checks.len(), 20);
        assert!(cfg.passed(&checks), "{checks:#?}");

        let checks = cfg.run(quadratic, w.view(), wrong.view()).unwrap();
        assert!(!cfg.passed(&checks));
        assert!(checks.iter().all(|c| c.rel_error > 0.1));
    }

    #[test]
    fn test_sparse_check_is_reproducible_with_seed() {
        let w = array![[1.0, -2.0, 0.0], [0.5, 4.0, 1.0]];
        let cfg = GradCheckConfig {
            seed: Some(42),
            ..Default::default()
        };

        let a = cfg.run(quadratic, w.view(), w.view()).unwrap();
        let b = cfg.run(quadratic, w.view(), w.view()).unwrap();
        let idx = |c: &[GradCheck]| c.iter().map(|c| c.index).collect::<Vec<_>>();
        assert_eq!(idx(&a), idx(&b));
    }
}

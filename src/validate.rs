use ndarray::{ArrayView1, ArrayView2};

use crate::{LossErr, Result};

/// The dimensions of a validated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    /// Number of examples (rows of `x`).
    pub n: usize,
    /// Number of features (rows of `w`, columns of `x`).
    pub d: usize,
    /// Number of classes (columns of `w`).
    pub c: usize,
}

/// Checks that `w` and `x` can be multiplied and that `w` has at least one class.
///
/// # Returns
/// The `(n, d, c)` dimensions, with `n` possibly zero.
pub(crate) fn check_product(w: ArrayView2<f64>, x: ArrayView2<f64>) -> Result<Dims> {
    let (d, c) = w.dim();
    let (n, xd) = x.dim();

    if xd != d {
        return Err(LossErr::SizeMismatch {
            a: "x columns",
            b: "w rows",
            got: xd,
            expected: d,
        });
    }

    if c == 0 {
        return Err(LossErr::NoClasses);
    }

    Ok(Dims { n, d, c })
}

/// Validates every argument of a loss computation before any arithmetic is done.
///
/// # Arguments
/// * `w` - The weights, `(d, c)`.
/// * `x` - The batch, `(n, d)`.
/// * `y` - The labels, `(n,)`.
/// * `reg` - The regularization strength.
///
/// # Returns
/// The batch dimensions or the first violated invariant.
pub fn check_inputs(
    w: ArrayView2<f64>,
    x: ArrayView2<f64>,
    y: ArrayView1<usize>,
    reg: f64,
) -> Result<Dims> {
    let dims = check_product(w, x)?;

    if y.len() != dims.n {
        return Err(LossErr::SizeMismatch {
            a: "y",
            b: "x rows",
            got: y.len(),
            expected: dims.n,
        });
    }

    if dims.n == 0 {
        return Err(LossErr::EmptyBatch);
    }

    // NaN fails this comparison as well
    if !(reg >= 0.0) {
        return Err(LossErr::NegativeRegularization(reg));
    }

    if let Some((index, &label)) = y.iter().enumerate().find(|&(_, &l)| l >= dims.c) {
        return Err(LossErr::LabelOutOfRange {
            index,
            label,
            classes: dims.c,
        });
    }

    Ok(dims)
}

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{
    LossErr, Result,
    loss::{Naive, SoftmaxLoss, Vectorized},
};

/// Which computation backs a [`LossConfig`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossStrategy {
    Naive,
    #[default]
    Vectorized,
}

impl SoftmaxLoss for LossStrategy {
    fn loss(
        &self,
        w: ArrayView2<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<usize>,
        reg: f64,
    ) -> Result<(f64, Array2<f64>)> {
        match self {
            LossStrategy::Naive => Naive.loss(w, x, y, reg),
            LossStrategy::Vectorized => Vectorized.loss(w, x, y, reg),
        }
    }
}

/// The knobs of a softmax loss evaluation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LossConfig {
    pub reg: f64,
    pub strategy: LossStrategy,
}

impl LossConfig {
    /// Creates a new `LossConfig`.
    ///
    /// # Errors
    /// Returns `LossErr::NegativeRegularization` if `reg` is negative or NaN.
    pub fn new(reg: f64, strategy: LossStrategy) -> Result<Self> {
        let cfg = Self { reg, strategy };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses a `LossConfig` from a JSON document such as
    /// `{"reg": 5e-6, "strategy": "naive"}`. Missing fields take their defaults.
    ///
    /// # Errors
    /// `LossErr::InvalidConfig` if the document is malformed, or
    /// `LossErr::NegativeRegularization` if `reg` is negative.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Computes the loss and gradient with this configuration's strategy and strength.
    pub fn compute(
        &self,
        w: ArrayView2<f64>,
        x: ArrayView2<f64>,
        y: ArrayView1<usize>,
    ) -> Result<(f64, Array2<f64>)> {
        self.strategy.loss(w, x, y, self.reg)
    }

    fn validate(&self) -> Result<()> {
        if !(self.reg >= 0.0) {
            return Err(LossErr::NegativeRegularization(self.reg));
        }

        Ok(())
    }
}

use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, LossErr>;

/// The crate's error type.
///
/// Every variant describes an invalid argument; nothing here is recoverable by retrying.
#[derive(Debug, Clone, PartialEq)]
pub enum LossErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyBatch,
    NoClasses,
    LabelOutOfRange {
        index: usize,
        label: usize,
        classes: usize,
    },
    NegativeRegularization(f64),
    InvalidStep(f64),
    InvalidConfig(String),
}

impl Display for LossErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            LossErr::EmptyBatch => write!(f, "The batch is empty, at least one example is needed"),
            LossErr::NoClasses => write!(f, "The weight matrix has no class columns"),
            LossErr::LabelOutOfRange {
                index,
                label,
                classes,
            } => write!(
                f,
                "Label {label} at position {index} is out of range for {classes} classes"
            ),
            LossErr::NegativeRegularization(reg) => {
                write!(f, "The regularization strength must be non-negative, got {reg}")
            }
            LossErr::InvalidStep(h) => {
                write!(f, "The finite difference step must be positive, got {h}")
            }
            LossErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for LossErr {}

impl From<serde_json::Error> for LossErr {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}

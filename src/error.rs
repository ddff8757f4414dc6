//! # Errors
//!
//! $$
//! f : \text{inputs} \to \text{Result}\langle T, \text{VarError} \rangle
//! $$
//!

/// Error type shared by every fallible routine in the crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VarError {
  /// Returned when a trend specification string is not recognized.
  #[error("invalid trend specification '{spec}' (expected one of n, nc, c, ct, ctt)")]
  InvalidTrendSpec {
    /// The rejected specification.
    spec: String,
  },

  /// Returned when array shapes are inconsistent with each other.
  #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
  DimensionMismatch {
    /// Which input or relation failed the check.
    what: &'static str,
    /// Expected extent.
    expected: usize,
    /// Observed extent.
    found: usize,
  },

  /// Returned when the series is not longer than the requested lag order.
  #[error("insufficient observations: got {nobs}, need more than {lags} for lag order {lags}")]
  InsufficientObservations {
    /// Number of observations provided.
    nobs: usize,
    /// Requested lag order.
    lags: usize,
  },

  /// Returned when a finiteness check finds NaN or infinity.
  #[error("{name} contains non-finite values")]
  NonFiniteInput {
    /// Name of the offending input.
    name: &'static str,
  },

  /// Returned by `HasConstant::Raise` when the data already holds a constant column.
  #[error("data contains a constant column; adding a constant with trend '{trend}' is not allowed")]
  ConstantPresent {
    /// Trend specification that would have added the constant.
    trend: String,
  },

  /// Returned when a scalar argument falls outside its admissible range.
  #[error("{name} = {value} is out of range ({range})")]
  OutOfRange {
    /// Argument name.
    name: &'static str,
    /// Rejected value.
    value: f64,
    /// Human-readable admissible range.
    range: &'static str,
  },

  /// Returned when a covariance matrix has a materially negative eigenvalue.
  #[error("covariance is not positive semi-definite (smallest eigenvalue {min_eigenvalue})")]
  IndefiniteCovariance {
    /// Smallest eigenvalue of the rejected matrix.
    min_eigenvalue: f64,
  },

  /// Returned when an input has no elements and its shape cannot be used.
  #[error("{name} is empty")]
  EmptyInput {
    /// Name of the empty input.
    name: &'static str,
  },
}

pub type Result<T> = std::result::Result<T, VarError>;

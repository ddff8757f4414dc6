use nalgebra::DMatrix;
use nalgebra::DVector;
use ndarray::Array1;
use ndarray::ArrayView1;
use ndarray::ArrayView2;
use tracing::trace;

use crate::error::Result;
use crate::error::VarError;
use crate::linalg::ensure_finite;

/// Parameters and residuals of a least-squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresFit {
  /// One coefficient per column of `exog`.
  pub params: Array1<f64>,
  /// `endog - exog * params`, on the unweighted scale.
  pub resid: Array1<f64>,
}

/// Linear least-squares engine consumed by model layers.
pub trait LeastSquares {
  fn fit(
    &self,
    endog: &ArrayView1<f64>,
    exog: &ArrayView2<f64>,
    weights: Option<&ArrayView1<f64>>,
  ) -> Result<LeastSquaresFit>;
}

/// Options for [`MinimalWls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WlsConfig {
  /// Reject NaN or infinite inputs with [`VarError::NonFiniteInput`].
  pub check_finite: bool,
}

/// Weighted least squares without result statistics.
///
/// Rows are scaled by `sqrt(w_i)` and solved through the SVD pseudo-inverse,
/// so rank-deficient designs return the minimum-norm solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalWls {
  pub cfg: WlsConfig,
}

impl MinimalWls {
  pub fn new(cfg: WlsConfig) -> Self {
    Self { cfg }
  }
}

impl LeastSquares for MinimalWls {
  fn fit(
    &self,
    endog: &ArrayView1<f64>,
    exog: &ArrayView2<f64>,
    weights: Option<&ArrayView1<f64>>,
  ) -> Result<LeastSquaresFit> {
    let (n, k) = exog.dim();
    if endog.len() != n {
      return Err(VarError::DimensionMismatch {
        what: "endog length",
        expected: n,
        found: endog.len(),
      });
    }
    if let Some(w) = weights {
      if w.len() != n {
        return Err(VarError::DimensionMismatch {
          what: "weights length",
          expected: n,
          found: w.len(),
        });
      }
    }
    if n == 0 || k == 0 {
      return Err(VarError::EmptyInput { name: "exog" });
    }

    if self.cfg.check_finite {
      ensure_finite(endog.iter(), "endog")?;
      ensure_finite(exog.iter(), "exog")?;
      if let Some(w) = weights {
        ensure_finite(w.iter(), "weights")?;
      }
    }

    if let Some(&bad) = weights.and_then(|w| w.iter().find(|&&v| v < 0.0)) {
      return Err(VarError::OutOfRange {
        name: "weights",
        value: bad,
        range: ">= 0",
      });
    }

    let sqrt_w = |i: usize| weights.map_or(1.0, |w| w[i].sqrt());
    let wx = DMatrix::from_fn(n, k, |i, j| exog[[i, j]] * sqrt_w(i));
    let wy = DVector::from_fn(n, |i, _| endog[i] * sqrt_w(i));

    let svd = wx.svd(true, true);
    let max_sv = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let eps = max_sv * n.max(k) as f64 * f64::EPSILON;
    trace!(rows = n, cols = k, eps, "solving weighted least squares");
    let beta = svd.solve(&wy, eps).map_err(|_| VarError::OutOfRange {
      name: "singular value cutoff",
      value: eps,
      range: ">= 0",
    })?;

    let params = Array1::from_iter(beta.iter().copied());
    let resid = endog - &exog.dot(&params);
    Ok(LeastSquaresFit { params, resid })
  }
}

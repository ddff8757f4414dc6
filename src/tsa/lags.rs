use ndarray::s;
use ndarray::Array2;
use ndarray::ArrayView2;
use tracing::debug;

use super::trend::add_trend;
use super::trend::HasConstant;
use super::trend::Trend;
use crate::error::Result;
use crate::error::VarError;

/// Deterministic-term options for [`var_design_matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesignConfig {
  /// Trend columns prepended to the lag block.
  pub trend: Trend,
  /// Policy when the lag block already contains a constant column.
  pub has_constant: HasConstant,
}

/// Predictor matrix of a VAR(p) model.
///
/// Row `r` corresponds to time `t = r + p` and holds
/// `[trend terms, y_{t-1}, y_{t-2}, ..., y_{t-p}]`, each lag block carrying
/// all `K` variables in their original order. The result has `nobs - p` rows.
///
/// Fails with [`VarError::InsufficientObservations`] when `nobs <= p`.
pub fn var_design_matrix(y: &ArrayView2<f64>, lags: usize, cfg: DesignConfig) -> Result<Array2<f64>> {
  let (nobs, k) = y.dim();
  if nobs <= lags {
    return Err(VarError::InsufficientObservations { nobs, lags });
  }

  let rows = nobs - lags;
  let mut z = Array2::<f64>::zeros((rows, k * lags));
  for r in 0..rows {
    let t = r + lags;
    for j in 0..lags {
      z.slice_mut(s![r, j * k..(j + 1) * k])
        .assign(&y.row(t - j - 1));
    }
  }

  let z = add_trend(&z.view(), cfg.trend, cfg.has_constant)?;
  debug!(rows = z.nrows(), cols = z.ncols(), lags, trend = %cfg.trend, "built VAR design matrix");
  Ok(z)
}

/// Coefficient names matching the columns of [`var_design_matrix`].
///
/// Trend names come first, then `exog0..exog{n-1}`, then `L{lag}.{name}` for
/// every lag `1..=lag_order` and every variable.
pub fn make_lag_names<S: ToString>(names: &[S], lag_order: usize, trend: Trend, exog_count: usize) -> Vec<String> {
  let mut out = Vec::with_capacity(trend.order() + exog_count + lag_order * names.len());
  out.extend(trend.names().iter().map(|n| n.to_string()));
  out.extend((0..exog_count).map(|i| format!("exog{i}")));
  for lag in 1..=lag_order {
    for name in names {
      out.push(format!("L{lag}.{}", name.to_string()));
    }
  }
  out
}

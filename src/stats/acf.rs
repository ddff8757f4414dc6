use ndarray::Array3;
use ndarray::ArrayView3;

use crate::error::Result;
use crate::error::VarError;

/// Convert a `(lags, K, K)` autocovariance array into autocorrelations.
///
/// Entry `(i, j)` of every slice is divided by `sqrt(acf[0][i, i] * acf[0][j, j])`.
pub fn acf_to_acorr(acf: &ArrayView3<f64>) -> Result<Array3<f64>> {
  let (lags, k, k2) = acf.dim();
  if k != k2 {
    return Err(VarError::DimensionMismatch {
      what: "autocovariance slice columns",
      expected: k,
      found: k2,
    });
  }
  if lags == 0 {
    return Err(VarError::EmptyInput {
      name: "autocovariance array",
    });
  }

  let diag: Vec<f64> = (0..k).map(|i| acf[[0, i, i]]).collect();
  Ok(Array3::from_shape_fn((lags, k, k), |(h, i, j)| {
    acf[[h, i, j]] / (diag[i] * diag[j]).sqrt()
  }))
}

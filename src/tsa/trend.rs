use std::fmt;
use std::str::FromStr;

use ndarray::concatenate;
use ndarray::s;
use ndarray::Array2;
use ndarray::ArrayView2;
use ndarray::Axis;
use tracing::debug;

use crate::error::Result;
use crate::error::VarError;

/// Deterministic terms carried by a VAR design matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
  /// No deterministic terms.
  None,
  /// Intercept only.
  #[default]
  Constant,
  /// Intercept and linear trend.
  ConstantLinear,
  /// Intercept, linear and quadratic trend.
  ConstantLinearQuadratic,
}

impl Trend {
  /// Number of leading deterministic columns, 0 to 3.
  pub fn order(self) -> usize {
    match self {
      Trend::None => 0,
      Trend::Constant => 1,
      Trend::ConstantLinear => 2,
      Trend::ConstantLinearQuadratic => 3,
    }
  }

  /// Inverse of [`Trend::order`].
  pub fn from_order(order: usize) -> Result<Self> {
    match order {
      0 => Ok(Trend::None),
      1 => Ok(Trend::Constant),
      2 => Ok(Trend::ConstantLinear),
      3 => Ok(Trend::ConstantLinearQuadratic),
      other => Err(VarError::InvalidTrendSpec {
        spec: other.to_string(),
      }),
    }
  }

  /// Display names of the deterministic columns, in column order.
  pub fn names(self) -> &'static [&'static str] {
    static NAMES: [&str; 3] = ["const", "trend", "trend**2"];
    &NAMES[..self.order()]
  }
}

impl FromStr for Trend {
  type Err = VarError;

  fn from_str(spec: &str) -> Result<Self> {
    match spec {
      "n" | "nc" => Ok(Trend::None),
      "c" => Ok(Trend::Constant),
      "ct" => Ok(Trend::ConstantLinear),
      "ctt" => Ok(Trend::ConstantLinearQuadratic),
      other => Err(VarError::InvalidTrendSpec {
        spec: other.to_string(),
      }),
    }
  }
}

impl fmt::Display for Trend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let spec = match self {
      Trend::None => "nc",
      Trend::Constant => "c",
      Trend::ConstantLinear => "ct",
      Trend::ConstantLinearQuadratic => "ctt",
    };
    f.write_str(spec)
  }
}

/// Resolve a trend specification string into its order.
pub fn resolve_trend_order(spec: &str) -> Result<usize> {
  spec.parse::<Trend>().map(Trend::order)
}

/// What to do when the data already contains a constant column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HasConstant {
  /// Fail with [`VarError::ConstantPresent`].
  Raise,
  /// Add the constant anyway.
  Add,
  /// Leave the constant out of the trend block.
  #[default]
  Skip,
}

/// Indices of columns with zero range and no zero entries.
///
/// A single row has zero range in every column, so it never counts as constant.
fn constant_columns(x: &ArrayView2<f64>) -> Vec<usize> {
  if x.nrows() < 2 {
    return Vec::new();
  }
  x.columns()
    .into_iter()
    .enumerate()
    .filter(|(_, col)| {
      let first = col[0];
      first != 0.0 && col.iter().all(|&v| v == first)
    })
    .map(|(j, _)| j)
    .collect()
}

/// Trend block with `order` columns: `1`, `t`, `t^2` for `t = 1..=nobs`.
pub fn trend_columns(nobs: usize, order: usize) -> Array2<f64> {
  Array2::from_shape_fn((nobs, order), |(i, j)| ((i + 1) as f64).powi(j as i32))
}

/// Prepend deterministic trend columns to `x`.
pub fn add_trend(x: &ArrayView2<f64>, trend: Trend, has_constant: HasConstant) -> Result<Array2<f64>> {
  if trend == Trend::None {
    return Ok(x.to_owned());
  }

  let mut block = trend_columns(x.nrows(), trend.order());
  let existing = constant_columns(x);
  if !existing.is_empty() {
    match has_constant {
      HasConstant::Raise => {
        return Err(VarError::ConstantPresent {
          trend: trend.to_string(),
        })
      }
      HasConstant::Skip => {
        debug!(columns = ?existing, "data already has a constant, skipping trend constant");
        block = block.slice(s![.., 1..]).to_owned();
      }
      HasConstant::Add => {
        debug!(columns = ?existing, "data already has a constant, adding trend constant anyway");
      }
    }
  }

  concatenate(Axis(1), &[block.view(), x.view()]).map_err(|_| VarError::DimensionMismatch {
    what: "trend block rows",
    expected: x.nrows(),
    found: block.nrows(),
  })
}

use ndarray::Array2;

/// Seasonal indicator regressors, one column per season except the last.
///
/// `first_period` is the season of row 0 (taken modulo `n_seasons`), so
/// column `i` is `1` at rows `r` with `(r + first_period) mod n_seasons == i`.
/// With `centered` every entry is shifted by `-1 / n_seasons`, making the
/// columns orthogonal to a constant.
/// `n_seasons == 0` gives a `len_endog x 0` matrix.
pub fn seasonal_dummies(n_seasons: usize, len_endog: usize, first_period: usize, centered: bool) -> Array2<f64> {
  if n_seasons == 0 {
    return Array2::zeros((len_endog, 0));
  }

  let first = first_period % n_seasons;
  let mut out = Array2::<f64>::zeros((len_endog, n_seasons - 1));
  for r in 0..len_endog {
    let season = (r + first) % n_seasons;
    if season < n_seasons - 1 {
      out[[r, season]] = 1.0;
    }
  }

  if centered {
    out -= 1.0 / n_seasons as f64;
  }
  out
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;
  use ndarray::Axis;

  use super::*;

  #[test]
  fn quarterly_dummies_cycle() {
    let d = seasonal_dummies(4, 8, 0, false);
    assert_eq!(d.dim(), (8, 3));
    let expected = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]];
    assert_eq!(d.slice(ndarray::s![..4, ..]), expected);
    assert_eq!(d.slice(ndarray::s![4.., ..]), expected);
  }

  #[test]
  fn first_period_shifts_the_cycle() {
    let d = seasonal_dummies(4, 4, 1, false);
    assert_eq!(
      d,
      array![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]
    );
    assert_eq!(seasonal_dummies(4, 4, 5, false), d);
  }

  #[test]
  fn zero_seasons_is_empty() {
    let d = seasonal_dummies(0, 5, 0, true);
    assert_eq!(d.dim(), (5, 0));
  }

  #[test]
  fn single_season_has_no_columns() {
    assert_eq!(seasonal_dummies(1, 3, 0, false).dim(), (3, 0));
  }

  #[test]
  fn centered_columns_sum_to_zero_over_full_cycles() {
    let d = seasonal_dummies(12, 36, 3, true);
    for s in d.sum_axis(Axis(0)).iter() {
      assert_abs_diff_eq!(*s, 0.0, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(d[[0, 0]], -1.0 / 12.0, epsilon = 1e-15);
  }
}

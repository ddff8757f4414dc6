use nalgebra::SymmetricEigen;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::ArrayView2;
use rand::Rng;
use rand_distr::StandardNormal;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;
use tracing::debug;

use crate::error::Result;
use crate::error::VarError;
use crate::linalg::ensure_finite;
use crate::linalg::ensure_square;
use crate::linalg::from_dmatrix;
use crate::linalg::to_dmatrix;

/// Source of Gaussian random vectors.
pub trait MultivariateNormal {
  /// Draw `count` vectors from `N(mean, cov)`, one per row.
  fn sample<R: Rng + ?Sized>(
    &self,
    mean: &ArrayView1<f64>,
    cov: &ArrayView2<f64>,
    count: usize,
    rng: &mut R,
  ) -> Result<Array2<f64>>;
}

/// Gaussian sampler that colours standard normal draws with a covariance factor.
///
/// The factor is the Cholesky factor when `cov` is positive definite and the
/// symmetric square root `V diag(sqrt(max(l, 0)))` otherwise, so singular
/// covariances (including the zero matrix) are accepted. Eigenvalues below
/// `-PSD_TOLERANCE * max|l|` fail with [`VarError::IndefiniteCovariance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FactorNormal;

/// Relative slack for round-off negative eigenvalues of a PSD covariance.
pub const PSD_TOLERANCE: f64 = 1e-10;

impl FactorNormal {
  /// Lower factor `L` with `L L^T = cov`.
  pub fn factor(cov: &ArrayView2<f64>) -> Result<Array2<f64>> {
    ensure_square(cov, "covariance columns")?;
    ensure_finite(cov.iter(), "covariance")?;
    let m = to_dmatrix(cov);

    if let Some(chol) = m.clone().cholesky() {
      return Ok(from_dmatrix(&chol.l()));
    }

    let eig = SymmetricEigen::new(m);
    let min = eig.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);
    let scale = eig.eigenvalues.iter().fold(0.0_f64, |acc, l| acc.max(l.abs()));
    if min < -PSD_TOLERANCE * scale {
      return Err(VarError::IndefiniteCovariance { min_eigenvalue: min });
    }
    debug!(min_eigenvalue = min, "covariance is singular, using symmetric square root");
    let mut v = eig.eigenvectors;
    for (j, lambda) in eig.eigenvalues.iter().enumerate() {
      let scale = lambda.max(0.0).sqrt();
      v.column_mut(j).scale_mut(scale);
    }
    Ok(from_dmatrix(&v))
  }
}

impl MultivariateNormal for FactorNormal {
  fn sample<R: Rng + ?Sized>(
    &self,
    mean: &ArrayView1<f64>,
    cov: &ArrayView2<f64>,
    count: usize,
    rng: &mut R,
  ) -> Result<Array2<f64>> {
    let l = Self::factor(cov)?;
    let k = l.nrows();
    if mean.len() != k {
      return Err(VarError::DimensionMismatch {
        what: "mean length",
        expected: k,
        found: mean.len(),
      });
    }

    let mut out = Array2::<f64>::zeros((count, k));
    let mut z = vec![0.0; k];
    for mut row in out.rows_mut() {
      for zi in z.iter_mut() {
        *zi = rng.sample(StandardNormal);
      }
      for i in 0..k {
        row[i] = mean[i] + (0..k).map(|j| l[[i, j]] * z[j]).sum::<f64>();
      }
    }
    Ok(out)
  }
}

/// Two-sided critical value of the standard normal, `Phi^{-1}(1 - alpha / 2)`.
pub fn norm_signif_level(alpha: f64) -> Result<f64> {
  if !(alpha > 0.0 && alpha < 1.0) {
    return Err(VarError::OutOfRange {
      name: "alpha",
      value: alpha,
      range: "0 < alpha < 1",
    });
  }
  let std_normal = Normal::new(0.0, 1.0).map_err(|_| VarError::OutOfRange {
    name: "standard deviation",
    value: 1.0,
    range: "> 0",
  })?;
  Ok(std_normal.inverse_cdf(1.0 - alpha / 2.0))
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;
  use ndarray::Array1;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;

  #[test]
  fn factor_reproduces_positive_definite_covariance() {
    let cov = array![[2.0, 0.3], [0.3, 1.0]];
    let l = FactorNormal::factor(&cov.view()).unwrap();
    let rebuilt = l.dot(&l.t());
    for (x, y) in rebuilt.iter().zip(cov.iter()) {
      assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
    }
  }

  #[test]
  fn factor_accepts_singular_covariance() {
    let cov = array![[1.0, 1.0], [1.0, 1.0]];
    let l = FactorNormal::factor(&cov.view()).unwrap();
    let rebuilt = l.dot(&l.t());
    for (x, y) in rebuilt.iter().zip(cov.iter()) {
      assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
    }
  }

  #[test]
  fn indefinite_covariance_is_rejected() {
    let cov = array![[1.0, 2.0], [2.0, 1.0]];
    match FactorNormal::factor(&cov.view()) {
      Err(VarError::IndefiniteCovariance { min_eigenvalue }) => {
        assert_abs_diff_eq!(min_eigenvalue, -1.0, epsilon = 1e-10)
      }
      other => panic!("expected indefinite covariance error, got {other:?}"),
    }

    let mean = Array1::<f64>::zeros(2);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(FactorNormal
      .sample(&mean.view(), &cov.view(), 10, &mut rng)
      .is_err());
  }

  #[test]
  fn zero_covariance_draws_the_mean() {
    let cov = Array2::<f64>::zeros((3, 3));
    let mean = array![1.0, -2.0, 0.5];
    let mut rng = StdRng::seed_from_u64(7);
    let draws = FactorNormal
      .sample(&mean.view(), &cov.view(), 4, &mut rng)
      .unwrap();
    for row in draws.rows() {
      assert_eq!(row, mean);
    }
  }

  #[test]
  fn sample_moments_match() {
    let cov = array![[1.0, 0.5], [0.5, 2.0]];
    let mean = Array1::<f64>::zeros(2);
    let mut rng = StdRng::seed_from_u64(42);
    let n = 40_000;
    let draws = FactorNormal
      .sample(&mean.view(), &cov.view(), n, &mut rng)
      .unwrap();
    let emp = draws.t().dot(&draws) / n as f64;
    for (x, y) in emp.iter().zip(cov.iter()) {
      assert_abs_diff_eq!(*x, *y, epsilon = 0.06);
    }
  }

  #[test]
  fn mean_length_must_match() {
    let cov = Array2::<f64>::eye(2);
    let mean = Array1::<f64>::zeros(3);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
      FactorNormal.sample(&mean.view(), &cov.view(), 1, &mut rng),
      Err(VarError::DimensionMismatch { .. })
    ));
  }

  #[test]
  fn signif_level_matches_known_quantiles() {
    assert_abs_diff_eq!(norm_signif_level(0.05).unwrap(), 1.959_963_984_540_054, epsilon = 1e-8);
    assert_abs_diff_eq!(norm_signif_level(0.10).unwrap(), 1.644_853_626_951_472_2, epsilon = 1e-8);
    assert!(norm_signif_level(0.0).is_err());
    assert!(norm_signif_level(f64::NAN).is_err());
  }
}

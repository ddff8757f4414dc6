use ndarray::s;
use ndarray::Array2;
use ndarray::Array3;
use ndarray::ArrayView3;
use num_complex::Complex64;
use tracing::trace;

use crate::error::Result;
use crate::error::VarError;
use crate::linalg::to_dmatrix;

/// Shape `(p, K)` of a coefficient array, checking that every slice is square.
pub fn coef_dims(coefs: &ArrayView3<f64>) -> Result<(usize, usize)> {
  let (p, k, k2) = coefs.dim();
  if k != k2 {
    return Err(VarError::DimensionMismatch {
      what: "coefficient slice columns",
      expected: k,
      found: k2,
    });
  }
  Ok((p, k))
}

/// Stack per-lag `K x K` matrices into a `(p, K, K)` coefficient array.
pub fn stack_coefs(slices: &[Array2<f64>]) -> Result<Array3<f64>> {
  let Some(first) = slices.first() else {
    return Err(VarError::EmptyInput {
      name: "coefficient slices",
    });
  };
  let k = first.nrows();
  let mut out = Array3::<f64>::zeros((slices.len(), k, k));
  for (j, a) in slices.iter().enumerate() {
    if a.nrows() != k {
      return Err(VarError::DimensionMismatch {
        what: "coefficient slice rows",
        expected: k,
        found: a.nrows(),
      });
    }
    if a.ncols() != k {
      return Err(VarError::DimensionMismatch {
        what: "coefficient slice columns",
        expected: k,
        found: a.ncols(),
      });
    }
    out.slice_mut(s![j, .., ..]).assign(a);
  }
  Ok(out)
}

/// Companion matrix of a VAR(p) process.
///
/// ```text
/// A = [A_1 A_2 ... A_{p-1} A_p]
///     [I_K 0   ... 0       0  ]
///     [0   I_K ... 0       0  ]
///     [0   0   ... I_K     0  ]
/// ```
pub fn companion_matrix(coefs: &ArrayView3<f64>) -> Result<Array2<f64>> {
  let (p, k) = coef_dims(coefs)?;
  if p == 0 || k == 0 {
    return Err(VarError::EmptyInput {
      name: "coefficient array",
    });
  }

  let kp = k * p;
  let mut a = Array2::<f64>::zeros((kp, kp));
  for j in 0..p {
    a.slice_mut(s![..k, j * k..(j + 1) * k])
      .assign(&coefs.slice(s![j, .., ..]));
  }
  for i in k..kp {
    a[[i, i - k]] = 1.0;
  }
  Ok(a)
}

/// Eigenvalues of the companion matrix.
pub fn companion_eigenvalues(coefs: &ArrayView3<f64>) -> Result<Vec<Complex64>> {
  let a = companion_matrix(coefs)?;
  let eig = to_dmatrix(&a.view()).complex_eigenvalues();
  let out: Vec<Complex64> = eig.iter().map(|z| Complex64::new(z.re, z.im)).collect();
  trace!(moduli = ?out.iter().map(|z| z.norm()).collect::<Vec<_>>(), "companion eigenvalues");
  Ok(out)
}

/// Whether every companion eigenvalue lies strictly inside the unit circle.
pub fn is_stable(coefs: &ArrayView3<f64>) -> Result<bool> {
  Ok(companion_eigenvalues(coefs)?.iter().all(|z| z.norm() < 1.0))
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;
  use ndarray::Array3;

  use super::*;

  fn coefs_3x2() -> Array3<f64> {
    Array3::from_shape_fn((3, 2, 2), |(j, r, c)| (100 * (j + 1) + 10 * r + c) as f64)
  }

  #[test]
  fn top_block_row_holds_coefficients_in_lag_order() {
    let coefs = coefs_3x2();
    let a = companion_matrix(&coefs.view()).unwrap();
    assert_eq!(a.dim(), (6, 6));
    assert_eq!(a.row(0).to_vec(), vec![100.0, 101.0, 200.0, 201.0, 300.0, 301.0]);
    assert_eq!(a.row(1).to_vec(), vec![110.0, 111.0, 210.0, 211.0, 310.0, 311.0]);
  }

  #[test]
  fn lower_blocks_are_identity_or_zero() {
    let (p, k) = (4, 3);
    let coefs = Array3::from_elem((p, k, k), 0.3);
    let a = companion_matrix(&coefs.view()).unwrap();
    for i in k..k * p {
      for j in 0..k * p {
        let expected = if j + k == i { 1.0 } else { 0.0 };
        assert_eq!(a[[i, j]], expected, "entry ({i}, {j})");
      }
    }
  }

  #[test]
  fn var1_companion_is_the_coefficient() {
    let coefs = array![[[0.5, 0.1], [0.2, 0.3]]];
    let a = companion_matrix(&coefs.view()).unwrap();
    assert_eq!(a, array![[0.5, 0.1], [0.2, 0.3]]);
  }

  #[test]
  fn rejects_non_square_slices() {
    let coefs = Array3::<f64>::zeros((2, 2, 3));
    assert!(matches!(
      companion_matrix(&coefs.view()),
      Err(VarError::DimensionMismatch { .. })
    ));
  }

  #[test]
  fn stack_rejects_inconsistent_slices() {
    let slices = vec![Array2::<f64>::eye(2), Array2::<f64>::eye(3)];
    assert_eq!(
      stack_coefs(&slices),
      Err(VarError::DimensionMismatch {
        what: "coefficient slice rows",
        expected: 2,
        found: 3
      })
    );
    assert!(stack_coefs(&[]).is_err());
  }

  #[test]
  fn diagonal_var1_eigenvalues_are_the_diagonal() {
    let coefs = array![[[0.6, 0.0], [0.0, -0.3]]];
    let mut eig = companion_eigenvalues(&coefs.view()).unwrap();
    eig.sort_by(|a, b| a.re.total_cmp(&b.re));
    assert_eq!(eig.len(), 2);
    assert_abs_diff_eq!(eig[0].re, -0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(eig[1].re, 0.6, epsilon = 1e-12);
    assert!(eig.iter().all(|z| z.im.abs() < 1e-12));
  }

  #[test]
  fn var2_roots_match_the_characteristic_polynomial() {
    // y_t = 0.5 y_{t-1} - 0.06 y_{t-2}: z^2 - 0.5 z + 0.06 = (z - 0.2)(z - 0.3)
    let coefs = array![[[0.5]], [[-0.06]]];
    let mut moduli: Vec<f64> = companion_eigenvalues(&coefs.view())
      .unwrap()
      .iter()
      .map(|z| z.norm())
      .collect();
    moduli.sort_by(f64::total_cmp);
    assert_abs_diff_eq!(moduli[0], 0.2, epsilon = 1e-10);
    assert_abs_diff_eq!(moduli[1], 0.3, epsilon = 1e-10);
  }

  #[test]
  fn stability_follows_root_moduli() {
    let stable = stack_coefs(&[array![[0.5, 0.1], [0.0, 0.4]], array![[0.1, 0.0], [0.0, 0.1]]]).unwrap();
    assert!(is_stable(&stable.view()).unwrap());

    let explosive = array![[[1.05, 0.0], [0.0, 0.2]]];
    assert!(!is_stable(&explosive.view()).unwrap());
  }
}

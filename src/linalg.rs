//! # Linear algebra primitives
//!
//! $$
//! \operatorname{vech}(A) = (a_{11}, a_{21}, \ldots, a_{K1}, a_{22}, \ldots, a_{KK})^\top
//! $$
//!
use nalgebra::DMatrix;
use nalgebra::SymmetricEigen;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView2;

use crate::error::Result;
use crate::error::VarError;

/// Copy an `ndarray` matrix into a `nalgebra` matrix.
pub fn to_dmatrix(a: &ArrayView2<f64>) -> DMatrix<f64> {
  let (rows, cols) = a.dim();
  DMatrix::from_fn(rows, cols, |i, j| a[[i, j]])
}

/// Copy a `nalgebra` matrix back into an `ndarray` matrix.
pub fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
  Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Check that `a` is square and return its order.
pub fn ensure_square(a: &ArrayView2<f64>, what: &'static str) -> Result<usize> {
  let (rows, cols) = a.dim();
  if rows != cols {
    return Err(VarError::DimensionMismatch {
      what,
      expected: rows,
      found: cols,
    });
  }
  Ok(rows)
}

/// Fail with `NonFiniteInput` if any element is NaN or infinite.
pub fn ensure_finite<'a, I>(values: I, name: &'static str) -> Result<()>
where
  I: IntoIterator<Item = &'a f64>,
{
  if values.into_iter().all(|v| v.is_finite()) {
    Ok(())
  } else {
    Err(VarError::NonFiniteInput { name })
  }
}

/// Half-vectorization of a square matrix.
///
/// Columns are visited left to right and, within column `i`, rows `i..K`
/// are emitted top to bottom. The result has `K(K+1)/2` entries.
pub fn vech(a: &ArrayView2<f64>) -> Result<Array1<f64>> {
  let k = ensure_square(a, "vech input columns")?;
  let mut out = Vec::with_capacity(k * (k + 1) / 2);
  for col in 0..k {
    for row in col..k {
      out.push(a[[row, col]]);
    }
  }
  Ok(Array1::from_vec(out))
}

/// Eigen-decomposition of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct SymmetricEigenDecomposition {
  /// Eigenvectors stored column-wise, column `i` pairs with `eigenvalues[i]`.
  pub eigenvectors: Array2<f64>,
  /// Eigenvalues in solver order.
  pub eigenvalues: Array1<f64>,
  /// Index of the largest eigenvalue.
  pub largest: usize,
}

/// Decompose a symmetric matrix and locate its largest eigenvalue.
///
/// Symmetry is not validated: only the lower triangle of `a` is read, so a
/// non-symmetric input is treated as the symmetric matrix sharing its lower
/// triangle.
pub fn symmetric_eigen_decomposition(a: &ArrayView2<f64>) -> Result<SymmetricEigenDecomposition> {
  let k = ensure_square(a, "eigen-decomposition input columns")?;
  if k == 0 {
    return Err(VarError::EmptyInput {
      name: "eigen-decomposition input",
    });
  }
  ensure_finite(a.iter(), "eigen-decomposition input")?;

  let eig = SymmetricEigen::new(to_dmatrix(a));
  let eigenvalues = Array1::from_iter(eig.eigenvalues.iter().copied());
  let largest = eigenvalues
    .iter()
    .enumerate()
    .fold((0usize, f64::NEG_INFINITY), |(best, max), (i, &v)| {
      if v > max {
        (i, v)
      } else {
        (best, max)
      }
    })
    .0;

  Ok(SymmetricEigenDecomposition {
    eigenvectors: from_dmatrix(&eig.eigenvectors),
    eigenvalues,
    largest,
  })
}

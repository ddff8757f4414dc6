use ndarray::s;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Array3;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use super::companion::coef_dims;
use crate::error::Result;
use crate::error::VarError;
use crate::stats::normal::FactorNormal;
use crate::stats::normal::MultivariateNormal;

/// Where the simulator takes its randomness from.
#[derive(Debug, Clone)]
pub enum RandomSource {
  /// Fresh generator seeded with the given integer.
  Seed(u64),
  /// Caller-supplied generator, consumed by the simulation.
  Generator(StdRng),
  /// Generator seeded from operating-system entropy.
  Entropy,
}

impl RandomSource {
  /// Resolve into the single generator used for the whole draw.
  pub fn into_rng(self) -> StdRng {
    match self {
      RandomSource::Seed(seed) => StdRng::seed_from_u64(seed),
      RandomSource::Generator(rng) => rng,
      RandomSource::Entropy => StdRng::from_entropy(),
    }
  }
}

impl From<u64> for RandomSource {
  fn from(seed: u64) -> Self {
    RandomSource::Seed(seed)
  }
}

impl From<StdRng> for RandomSource {
  fn from(rng: StdRng) -> Self {
    RandomSource::Generator(rng)
  }
}

/// Deterministic part added to every simulated observation.
#[derive(Debug, Clone, PartialEq)]
pub enum Intercept {
  /// Length-`K` intercept shared by all rows.
  Constant(Array1<f64>),
  /// `(steps, K)` observation-specific offset.
  Offset(Array2<f64>),
}

/// Gaussian VAR(p) simulation.
///
/// \[
///   y_t = c_t + A_1 y_{t-1} + \dots + A_p y_{t-p} + u_t,
///   \quad u_t \sim \mathcal{N}(0, \Sigma_u).
/// \]
///
/// The first `p` rows are initial values: they carry the intercept but no
/// noise and no autoregressive terms. `steps` counts these rows.
#[derive(Debug, Clone)]
pub struct VarSimulation {
  /// Lag coefficients, shape `(p, K, K)`.
  pub coefs: Array3<f64>,
  /// Optional intercept or offset.
  pub intercept: Option<Intercept>,
  /// Innovation covariance, identity when absent.
  pub cov_resid: Option<Array2<f64>>,
  /// Number of rows to produce, initial values included.
  pub steps: usize,
}

impl VarSimulation {
  /// Create a simulation with zero intercept and identity innovation covariance.
  pub fn new(coefs: Array3<f64>, steps: usize) -> Self {
    Self {
      coefs,
      intercept: None,
      cov_resid: None,
      steps,
    }
  }

  /// Add a shared intercept or a per-row offset.
  pub fn with_intercept(mut self, intercept: Intercept) -> Self {
    self.intercept = Some(intercept);
    self
  }

  /// Replace the identity innovation covariance.
  pub fn with_cov_resid(mut self, cov_resid: Array2<f64>) -> Self {
    self.cov_resid = Some(cov_resid);
    self
  }

  /// Simulate with the default Gaussian sampler.
  pub fn simulate(&self, source: RandomSource) -> Result<Array2<f64>> {
    let seeded = !matches!(source, RandomSource::Entropy);
    debug!(steps = self.steps, seeded, "simulating VAR process");
    let mut rng = source.into_rng();
    self.simulate_with(&FactorNormal, &mut rng)
  }

  /// Simulate drawing innovations from `sampler` with `rng`.
  ///
  /// The sampler is called exactly once for `steps` draws.
  pub fn simulate_with<S, R>(&self, sampler: &S, rng: &mut R) -> Result<Array2<f64>>
  where
    S: MultivariateNormal,
    R: Rng + ?Sized,
  {
    let (p, k) = coef_dims(&self.coefs.view())?;
    let steps = self.steps;

    let cov = match &self.cov_resid {
      Some(cov) => {
        if cov.dim() != (k, k) {
          return Err(VarError::DimensionMismatch {
            what: "residual covariance order",
            expected: k,
            found: if cov.nrows() != k { cov.nrows() } else { cov.ncols() },
          });
        }
        cov.clone()
      }
      None => Array2::eye(k),
    };
    self.check_intercept(k)?;

    let noise = sampler.sample(&Array1::zeros(k).view(), &cov.view(), steps, rng)?;
    let mut result = Array2::<f64>::zeros((steps, k));
    match &self.intercept {
      Some(Intercept::Constant(c)) => result += c,
      Some(Intercept::Offset(offset)) => result += offset,
      None => {}
    }
    if steps > p {
      let mut tail = result.slice_mut(s![p.., ..]);
      tail += &noise.slice(s![p.., ..]);
    }

    for t in p..steps {
      for j in 0..p {
        let lagged = self.coefs.slice(s![j, .., ..]).dot(&result.row(t - j - 1));
        let mut row = result.row_mut(t);
        row += &lagged;
      }
    }

    Ok(result)
  }

  fn check_intercept(&self, k: usize) -> Result<()> {
    match &self.intercept {
      Some(Intercept::Constant(c)) if c.len() != k => Err(VarError::DimensionMismatch {
        what: "intercept length",
        expected: k,
        found: c.len(),
      }),
      Some(Intercept::Offset(offset)) if offset.nrows() != self.steps => {
        Err(VarError::DimensionMismatch {
          what: "offset rows",
          expected: self.steps,
          found: offset.nrows(),
        })
      }
      Some(Intercept::Offset(offset)) if offset.ncols() != k => Err(VarError::DimensionMismatch {
        what: "offset columns",
        expected: k,
        found: offset.ncols(),
      }),
      _ => Ok(()),
    }
  }
}

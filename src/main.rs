use anyhow::Result;
use ndarray::array;
use ndarray::s;
use vector_ar::regression::LeastSquares;
use vector_ar::regression::MinimalWls;
use vector_ar::tsa::companion_eigenvalues;
use vector_ar::tsa::make_lag_names;
use vector_ar::tsa::stack_coefs;
use vector_ar::tsa::var_design_matrix;
use vector_ar::tsa::DesignConfig;
use vector_ar::tsa::Intercept;
use vector_ar::tsa::RandomSource;
use vector_ar::tsa::VarSimulation;

fn main() -> Result<()> {
  let lags = 2;
  let names = ["gdp", "infl"];
  let coefs = stack_coefs(&[
    array![[0.5, 0.1], [0.2, 0.3]],
    array![[0.1, 0.0], [0.05, 0.1]],
  ])?;

  let y = VarSimulation::new(coefs.clone(), 500)
    .with_intercept(Intercept::Constant(array![1.0, 0.5]))
    .with_cov_resid(array![[1.0, 0.2], [0.2, 0.5]])
    .simulate(RandomSource::Seed(42))?;

  let cfg = DesignConfig::default();
  let z = var_design_matrix(&y.view(), lags, cfg)?;
  let columns = make_lag_names(&names, lags, cfg.trend, 0);

  let ols = MinimalWls::default();
  for (i, name) in names.iter().enumerate() {
    let endog = y.slice(s![lags.., i]);
    let fit = ols.fit(&endog, &z.view(), None)?;
    println!("equation {name}:");
    for (col, beta) in columns.iter().zip(fit.params.iter()) {
      println!("  {col:>10} {beta:>10.4}");
    }
  }

  println!("companion eigenvalue moduli:");
  for root in companion_eigenvalues(&coefs.view())? {
    println!("  {:.4}", root.norm());
  }

  Ok(())
}

//! # Regression
//!
//! $$
//! \hat\beta = \arg\min_\beta \sum_i w_i (y_i - x_i^\top \beta)^2
//! $$
//!
pub mod wls;

pub use wls::LeastSquares;
pub use wls::LeastSquaresFit;
pub use wls::MinimalWls;
pub use wls::WlsConfig;

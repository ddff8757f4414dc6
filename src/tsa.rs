//! # Time-series analysis
//!
//! $$
//! Z_t = [d_t, y_{t-1}^\top, \ldots, y_{t-p}^\top]
//! $$
//!
pub mod companion;
pub mod lags;
pub mod seasonal;
pub mod simulate;
pub mod trend;

pub use companion::companion_eigenvalues;
pub use companion::companion_matrix;
pub use companion::is_stable;
pub use companion::stack_coefs;
pub use lags::make_lag_names;
pub use lags::var_design_matrix;
pub use lags::DesignConfig;
pub use seasonal::seasonal_dummies;
pub use simulate::Intercept;
pub use simulate::RandomSource;
pub use simulate::VarSimulation;
pub use trend::add_trend;
pub use trend::resolve_trend_order;
pub use trend::HasConstant;
pub use trend::Trend;

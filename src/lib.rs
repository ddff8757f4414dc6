//! # vector-ar
//!
//! $$
//! y_t = c + A_1 y_{t-1} + \dots + A_p y_{t-p} + u_t
//! $$
//!
//! Numerical building blocks for vector autoregressions.
//!
//! | Module         | Description                                                                  |
//! |----------------|------------------------------------------------------------------------------|
//! | [`tsa`]        | Lag matrices, trend terms, companion form, simulation and seasonal dummies.  |
//! | [`linalg`]     | Half-vectorization and symmetric eigen-decomposition.                        |
//! | [`stats`]      | Gaussian vector sampling, normal critical values and autocorrelations.       |
//! | [`regression`] | Least-squares interface and a minimal weighted least-squares solver.         |
//!
//! All routines are pure functions of their inputs (plus an explicit random
//! source for simulation) and report failures through [`VarError`].
pub mod error;
pub mod linalg;
pub mod regression;
pub mod stats;
pub mod tsa;

pub use error::Result;
pub use error::VarError;

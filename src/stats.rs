//! # Stats
//!
//! $$
//! u \sim \mathcal{N}(\mu, \Sigma), \qquad \rho_h = D^{-1/2} \Gamma_h D^{-1/2}
//! $$
//!
pub mod acf;
pub mod normal;

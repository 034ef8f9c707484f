//! Sources of the derivative contributions to the SCF gradient
//!
//! The nuclear repulsion term comes straight from the geometry
//! ([`crate::Molecule::nuclear_repulsion_energy_deriv1`]). The three
//! integral-derivative terms come from a [`DerivativeEvaluator`], fed with the
//! densities built in [`crate::density_impl`]. With the closed-shell factors
//! used by [`TabulatedDerivatives`]:
//!
//! - overlap: `-2 sum W_mn dS_mn`
//! - one-electron: `2 sum Q_mn dH_mn`
//! - two-electron: `sum (2 Q_mn Q_ls - Q_ml Q_ns) d(mn|ls)`

mod evaluator;
mod tabulated;

pub use evaluator::DerivativeEvaluator;
pub use tabulated::{Perturbation, TabulatedDerivatives};

//! Analytic first derivatives of the closed-shell (RHF) SCF energy with
//! respect to nuclear coordinates.
//!
//! The pipeline takes a converged, symmetry-blocked SCF reference, moves the
//! orbitals to the AO basis, builds the one-particle and energy-weighted
//! densities, contracts them with derivative integrals and sums the pieces
//! into an `natom x 3` gradient.

pub mod app;
pub mod config;
pub mod density_impl;
pub mod deriv_impl;
pub mod error;
pub mod gradient_impl;
pub mod io;
pub mod symmetry_impl;
pub mod system_impl;

pub use density_impl::{build_densities, Densities};
pub use deriv_impl::{DerivativeEvaluator, TabulatedDerivatives};
pub use error::{DerivError, Result};
pub use gradient_impl::{compute_gradient, GradientBreakdown, GradientContext, ScfGradient};
pub use io::{GradientWriter, GRADIENT_FILE};
pub use symmetry_impl::{so_block_to_ao, BlockMatrix, Dimension, SoTransform};
pub use system_impl::{Atom, BasisSet, Molecule, ScfReference, Shell};

//! Assembly of the closed-shell SCF gradient
//!
//! [`compute_gradient`] runs the whole linear pipeline for one geometry:
//!
//! 1. SO coefficients -> AO coefficients ([`crate::symmetry_impl::so_block_to_ao`])
//! 2. Q and W ([`crate::density_impl::build_densities`])
//! 3. nuclear, one-electron, overlap and two-electron contributions
//! 4. their sum, in that order
//!
//! Writing the result is left to [`crate::io::GradientWriter`].

mod gradient;

pub use gradient::{
    compute_gradient, log_atom_vector, GradientBreakdown, GradientContext, ScfGradient,
};

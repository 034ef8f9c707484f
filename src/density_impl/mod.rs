//! One-particle and energy-weighted densities of a closed-shell reference

mod density;

pub use density::{build_densities, unordered_irreps, Densities};

#[cfg(test)]
mod tests;

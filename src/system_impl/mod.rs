//! Read-only inputs of a gradient evaluation: geometry, basis bookkeeping and
//! the converged SCF reference.

mod basis_set;
mod molecule;
mod reference;

pub use basis_set::{BasisSet, Shell};
pub use molecule::{Atom, Molecule};
pub use reference::ScfReference;

#[cfg(test)]
mod tests;

//! Symmetry-blocked matrices and the SO <-> AO basis transform
//!
//! Quantities coming out of a symmetry-adapted SCF are stored per irreducible
//! representation. Everything downstream of the density builder works in the
//! plain AO basis, and [`so_block_to_ao`] is the only bridge between the two.

mod block_matrix;
mod dimension;
mod transform;

pub use block_matrix::BlockMatrix;
pub use dimension::{block_offsets, BlockOffset, Dimension};
pub use transform::{ao_to_so_block, so_block_to_ao, SoTransform};

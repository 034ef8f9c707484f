use crate::error::Result;
use nalgebra::DMatrix;

/// Contracts derivative integrals against AO densities.
///
/// Every method returns an `natom x 3` matrix (rows ordered like the atoms of
/// the molecule, columns x, y, z) in hartree/bohr. The occupation factors of
/// the closed-shell energy expression belong to the implementation; the
/// densities passed in are the bare `Q` and `W`.
pub trait DerivativeEvaluator {
    /// Pulay term: contraction of dS/dR with the energy-weighted density.
    fn overlap_derivative(&self, w: &DMatrix<f64>) -> Result<DMatrix<f64>>;

    /// Contraction of dH/dR (kinetic + nuclear attraction) with Q.
    fn one_electron_derivative(&self, q: &DMatrix<f64>) -> Result<DMatrix<f64>>;

    /// Contraction of d(mn|ls)/dR with the Coulomb and exchange products of Q.
    fn two_electron_derivative(&self, q: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}

use super::evaluator::DerivativeEvaluator;
use crate::error::{DerivError, Result};
use nalgebra::DMatrix;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// (atom, Cartesian axis) a derivative integral is taken with respect to.
pub type Perturbation = (usize, usize);

/// Derivative integrals supplied as precomputed tables, one table per
/// perturbation. Perturbations without a table contribute zero.
///
/// Two-electron tables are `nbf^2 x nbf^2` supermatrices with row index
/// `m * nbf + n` and column index `l * nbf + s` for `d(mn|ls)`.
#[derive(Debug, Clone)]
pub struct TabulatedDerivatives {
    natom: usize,
    nbf: usize,
    overlap: BTreeMap<Perturbation, DMatrix<f64>>,
    one_electron: BTreeMap<Perturbation, DMatrix<f64>>,
    two_electron: BTreeMap<Perturbation, DMatrix<f64>>,
}

impl TabulatedDerivatives {
    pub fn new(natom: usize, nbf: usize) -> Self {
        TabulatedDerivatives {
            natom,
            nbf,
            overlap: BTreeMap::new(),
            one_electron: BTreeMap::new(),
            two_electron: BTreeMap::new(),
        }
    }

    pub fn natom(&self) -> usize {
        self.natom
    }

    pub fn nbf(&self) -> usize {
        self.nbf
    }

    pub fn insert_overlap(&mut self, atom: usize, axis: usize, ds: DMatrix<f64>) -> Result<()> {
        let key = self.perturbation(atom, axis)?;
        check_shape("dS table", &ds, (self.nbf, self.nbf))?;
        self.overlap.insert(key, ds);
        Ok(())
    }

    pub fn insert_one_electron(&mut self, atom: usize, axis: usize, dh: DMatrix<f64>) -> Result<()> {
        let key = self.perturbation(atom, axis)?;
        check_shape("dH table", &dh, (self.nbf, self.nbf))?;
        self.one_electron.insert(key, dh);
        Ok(())
    }

    pub fn insert_two_electron(&mut self, atom: usize, axis: usize, deri: DMatrix<f64>) -> Result<()> {
        let key = self.perturbation(atom, axis)?;
        let pairs = self.nbf * self.nbf;
        check_shape("d(mn|ls) table", &deri, (pairs, pairs))?;
        self.two_electron.insert(key, deri);
        Ok(())
    }

    fn perturbation(&self, atom: usize, axis: usize) -> Result<Perturbation> {
        if atom >= self.natom || axis >= 3 {
            return Err(DerivError::shape(
                "derivative perturbation",
                (self.natom, 3),
                (atom + 1, axis + 1),
            ));
        }
        Ok((atom, axis))
    }

    fn contract(
        &self,
        tables: &BTreeMap<Perturbation, DMatrix<f64>>,
        density: &DMatrix<f64>,
        factor: f64,
    ) -> DMatrix<f64> {
        let mut gradient = DMatrix::zeros(self.natom, 3);
        for (&(atom, axis), table) in tables {
            gradient[(atom, axis)] = factor * density.dot(table);
        }
        gradient
    }
}

impl DerivativeEvaluator for TabulatedDerivatives {
    fn overlap_derivative(&self, w: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        check_shape("W", w, (self.nbf, self.nbf))?;
        Ok(self.contract(&self.overlap, w, -2.0))
    }

    fn one_electron_derivative(&self, q: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        check_shape("Q", q, (self.nbf, self.nbf))?;
        Ok(self.contract(&self.one_electron, q, 2.0))
    }

    fn two_electron_derivative(&self, q: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        check_shape("Q", q, (self.nbf, self.nbf))?;

        let gamma = two_particle_density(q);
        let tables: Vec<(&Perturbation, &DMatrix<f64>)> = self.two_electron.iter().collect();
        debug!(
            "Contracting {} two-electron derivative tables ({} pair functions)",
            tables.len(),
            gamma.nrows()
        );

        let values: Vec<(Perturbation, f64)> = tables
            .par_iter()
            .map(|&(&key, table)| (key, gamma.dot(table)))
            .collect();

        let mut gradient = DMatrix::zeros(self.natom, 3);
        for ((atom, axis), value) in values {
            gradient[(atom, axis)] = value;
        }
        Ok(gradient)
    }
}

/// Closed-shell two-particle density `2 Q_mn Q_ls - Q_ml Q_ns` as a supermatrix.
fn two_particle_density(q: &DMatrix<f64>) -> DMatrix<f64> {
    let nbf = q.nrows();
    let pairs = nbf * nbf;
    DMatrix::from_fn(pairs, pairs, |row, col| {
        let (m, n) = (row / nbf, row % nbf);
        let (l, s) = (col / nbf, col % nbf);
        2.0 * q[(m, n)] * q[(l, s)] - q[(m, l)] * q[(n, s)]
    })
}

fn check_shape(context: &str, matrix: &DMatrix<f64>, expected: (usize, usize)) -> Result<()> {
    if matrix.shape() != expected {
        return Err(DerivError::shape(context, expected, matrix.shape()));
    }
    Ok(())
}

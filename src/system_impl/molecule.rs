use crate::error::{DerivError, Result};
use nalgebra::{DMatrix, Vector3};
use periodic_table_on_an_enum::Element;

/// A nucleus: element and Cartesian position in bohr.
#[derive(Clone)]
pub struct Atom {
    pub element: Element,
    pub position: Vector3<f64>,
}

impl Atom {
    pub fn new(element: Element, position: Vector3<f64>) -> Self {
        Atom { element, position }
    }

    /// Nuclear charge Z.
    pub fn charge(&self) -> f64 {
        self.element.get_atomic_number() as f64
    }

    pub fn symbol(&self) -> &str {
        self.element.get_symbol()
    }
}

/// Fixed molecular geometry the gradient is evaluated at.
#[derive(Clone)]
pub struct Molecule {
    atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Result<Self> {
        if atoms.is_empty() {
            return Err(DerivError::MissingInput(
                "active molecule not set (no atoms)".to_string(),
            ));
        }
        Ok(Molecule { atoms })
    }

    pub fn natom(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn nuclear_repulsion_energy(&self) -> f64 {
        let mut energy = 0.0;
        for i in 0..self.natom() {
            for j in (i + 1)..self.natom() {
                let r = (self.atoms[i].position - self.atoms[j].position).norm();
                energy += self.atoms[i].charge() * self.atoms[j].charge() / r;
            }
        }
        energy
    }

    /// First derivative of the nuclear repulsion energy, one row per atom.
    ///
    /// `dE/dR_i = -sum_j Z_i Z_j (R_i - R_j) / |R_i - R_j|^3`
    pub fn nuclear_repulsion_energy_deriv1(&self) -> DMatrix<f64> {
        let mut gradient = DMatrix::zeros(self.natom(), 3);

        for i in 0..self.natom() {
            let mut row = Vector3::zeros();
            for j in 0..self.natom() {
                if i == j {
                    continue;
                }

                let r_ij = self.atoms[i].position - self.atoms[j].position;
                let r = r_ij.norm();
                if r < 1e-10 {
                    continue;
                }

                row -= self.atoms[i].charge() * self.atoms[j].charge() * r_ij / (r * r * r);
            }
            gradient.row_mut(i).copy_from(&row.transpose());
        }

        gradient
    }
}

use crate::error::{DerivError, Result};
use crate::symmetry_impl::{BlockMatrix, Dimension};
use nalgebra::DVector;

/// Converged closed-shell SCF solution in the SO basis.
#[derive(Debug, Clone)]
pub struct ScfReference {
    ca: BlockMatrix,
    epsilon_a: Vec<DVector<f64>>,
    doccpi: Vec<usize>,
    energy: f64,
}

impl ScfReference {
    /// `ca` is blocked `nsopi x nmopi`; `epsilon_a[h]` holds the orbital
    /// energies of irrep `h` in the same order as the MO columns.
    pub fn new(
        ca: BlockMatrix,
        epsilon_a: Vec<DVector<f64>>,
        doccpi: Vec<usize>,
        energy: f64,
        converged: bool,
    ) -> Result<Self> {
        if !converged {
            return Err(DerivError::MissingInput(
                "SCF reference is not converged".to_string(),
            ));
        }
        if doccpi.len() != ca.nirrep() {
            return Err(DerivError::dimension(
                "doubly occupied orbitals per irrep",
                ca.nirrep(),
                doccpi.len(),
            ));
        }
        if epsilon_a.len() != ca.nirrep() {
            return Err(DerivError::dimension(
                "orbital energy irreps",
                ca.nirrep(),
                epsilon_a.len(),
            ));
        }

        Ok(ScfReference {
            ca,
            epsilon_a,
            doccpi,
            energy,
        })
    }

    pub fn nirrep(&self) -> usize {
        self.ca.nirrep()
    }

    pub fn ca(&self) -> &BlockMatrix {
        &self.ca
    }

    pub fn epsilon_a(&self) -> &[DVector<f64>] {
        &self.epsilon_a
    }

    pub fn doccpi(&self) -> &[usize] {
        &self.doccpi
    }

    pub fn nsopi(&self) -> &Dimension {
        self.ca.rowspi()
    }

    pub fn nmopi(&self) -> &Dimension {
        self.ca.colspi()
    }

    pub fn nso(&self) -> usize {
        self.nsopi().sum()
    }

    pub fn nmo(&self) -> usize {
        self.nmopi().sum()
    }

    pub fn ndocc(&self) -> usize {
        self.doccpi.iter().sum()
    }

    /// Total SCF energy, written next to the gradient.
    pub fn energy(&self) -> f64 {
        self.energy
    }
}

use super::molecule::Molecule;
use crate::error::{DerivError, Result};
use serde::{Deserialize, Serialize};

/// One contracted shell of the orbital basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shell {
    /// index of the atom the shell sits on
    pub center: usize,
    /// angular momentum
    pub l: u32,
    pub n_primitive: usize,
}

impl Shell {
    pub fn n_cartesian(&self) -> usize {
        let l = self.l as usize;
        (l + 1) * (l + 2) / 2
    }

    pub fn n_pure(&self) -> usize {
        2 * self.l as usize + 1
    }
}

/// Orbital basis on a molecule. Only the bookkeeping is kept here; the
/// integrals themselves are evaluated elsewhere.
#[derive(Clone)]
pub struct BasisSet {
    name: String,
    molecule: Molecule,
    shells: Vec<Shell>,
    puream: bool,
}

impl BasisSet {
    pub fn new(
        name: impl Into<String>,
        molecule: Molecule,
        shells: Vec<Shell>,
        puream: bool,
    ) -> Result<Self> {
        if shells.is_empty() {
            return Err(DerivError::MissingInput("basis set has no shells".to_string()));
        }
        if let Some((idx, shell)) = shells
            .iter()
            .enumerate()
            .find(|(_, shell)| shell.center >= molecule.natom())
        {
            return Err(DerivError::MissingInput(format!(
                "shell {} is centred on atom {} but the molecule has {} atoms",
                idx,
                shell.center,
                molecule.natom()
            )));
        }

        Ok(BasisSet {
            name: name.into(),
            molecule,
            shells,
            puream,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn puream(&self) -> bool {
        self.puream
    }

    pub fn nshell(&self) -> usize {
        self.shells.len()
    }

    pub fn nprimitive(&self) -> usize {
        self.shells.iter().map(|s| s.n_primitive).sum()
    }

    /// Number of Cartesian atomic orbitals.
    pub fn nao(&self) -> usize {
        self.shells.iter().map(Shell::n_cartesian).sum()
    }

    /// Number of basis functions, pure or Cartesian depending on `puream`.
    pub fn nbf(&self) -> usize {
        if self.puream {
            self.shells.iter().map(Shell::n_pure).sum()
        } else {
            self.nao()
        }
    }
}

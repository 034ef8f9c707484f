//! Configuration for gradient runs
//!
//! A job file carries everything a converged SCF run leaves behind: the
//! geometry, basis shells, SO transform, orbitals and the derivative integrals.

mod args;

pub use args::Args;

use crate::io::GRADIENT_FILE;
use crate::system_impl::Shell;
use serde::{Deserialize, Serialize};

/// Main configuration structure for a gradient job
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub geometry: Vec<Atom>,
    pub basis: BasisParams,
    /// Absent for C1 jobs, where SOs and AOs coincide.
    pub symmetry: Option<SymmetryParams>,
    pub reference: Option<ReferenceParams>,
    #[serde(default)]
    pub derivatives: DerivativeTables,
    #[serde(default)]
    pub output: OutputParams,
}

/// Atomic position in bohr
#[derive(Debug, Deserialize, Serialize)]
pub struct Atom {
    pub element: String,
    pub coords: [f64; 3],
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BasisParams {
    pub name: Option<String>,
    pub puream: Option<bool>,
    pub shells: Vec<Shell>,
}

impl BasisParams {
    pub fn with_defaults(mut self) -> Self {
        if self.name.is_none() {
            self.name = Some("user".to_string());
        }
        if self.puream.is_none() {
            self.puream = Some(false);
        }
        self
    }
}

/// SO/AO tables, one block per irrep, each block given row by row.
#[derive(Debug, Deserialize, Serialize)]
pub struct SymmetryParams {
    pub nsopi: Vec<usize>,
    /// Block `h` is `nsopi[h] x nbf`.
    pub uso_to_ao: Vec<Vec<Vec<f64>>>,
    /// Block `h` is `nbf x nsopi[h]`.
    pub ao_to_so: Vec<Vec<Vec<f64>>>,
}

/// Converged closed-shell SCF solution in the SO basis
#[derive(Debug, Deserialize, Serialize)]
pub struct ReferenceParams {
    pub converged: Option<bool>,
    pub energy: f64,
    pub doccpi: Vec<usize>,
    /// Defaults to the SO counts (no linear dependencies removed).
    pub nmopi: Option<Vec<usize>>,
    /// Block `h` is `nsopi[h] x nmopi[h]`.
    pub ca: Vec<Vec<Vec<f64>>>,
    pub epsilon_a: Vec<Vec<f64>>,
}

impl ReferenceParams {
    pub fn with_defaults(mut self) -> Self {
        if self.converged.is_none() {
            self.converged = Some(true);
        }
        self
    }
}

/// One derivative integral table for a single (atom, axis) perturbation
#[derive(Debug, Deserialize, Serialize)]
pub struct DerivativeTable {
    pub atom: usize,
    /// 0, 1, 2 for x, y, z
    pub axis: usize,
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DerivativeTables {
    #[serde(default)]
    pub overlap: Vec<DerivativeTable>,
    #[serde(default)]
    pub one_electron: Vec<DerivativeTable>,
    /// `nbf^2 x nbf^2` supermatrices, row `m * nbf + n`, column `l * nbf + s`.
    #[serde(default)]
    pub two_electron: Vec<DerivativeTable>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputParams {
    pub gradient_file: Option<String>,
    pub label: Option<String>,
}

impl Default for OutputParams {
    fn default() -> Self {
        OutputParams {
            gradient_file: Some(GRADIENT_FILE.to_string()),
            label: Some(String::new()),
        }
    }
}

impl OutputParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.gradient_file.is_none() {
            self.gradient_file = defaults.gradient_file;
        }
        if self.label.is_none() {
            self.label = defaults.label;
        }
        self
    }
}

impl Config {
    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.basis = self.basis.with_defaults();
        if let Some(reference) = self.reference.take() {
            self.reference = Some(reference.with_defaults());
        }
        self.output = self.output.with_defaults();
        self
    }

    /// Command-line values win over the job file.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(path) = &args.gradient_file {
            self.output.gradient_file = Some(path.clone());
        }
        if let Some(label) = &args.label {
            self.output.label = Some(label.clone());
        }
    }

    pub fn gradient_file(&self) -> String {
        self.output
            .gradient_file
            .clone()
            .unwrap_or_else(|| GRADIENT_FILE.to_string())
    }

    pub fn label(&self) -> String {
        self.output.label.clone().unwrap_or_default()
    }
}

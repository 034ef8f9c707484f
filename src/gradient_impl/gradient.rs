use crate::density_impl::{build_densities, Densities};
use crate::deriv_impl::DerivativeEvaluator;
use crate::error::{DerivError, Result};
use crate::symmetry_impl::{so_block_to_ao, SoTransform};
use crate::system_impl::{BasisSet, Molecule, ScfReference};
use nalgebra::DMatrix;
use tracing::info;

/// Everything one gradient evaluation reads. Built once by the caller and
/// borrowed for the duration of [`compute_gradient`].
pub struct GradientContext<'a, E: DerivativeEvaluator> {
    pub basis: &'a BasisSet,
    pub transform: &'a SoTransform,
    pub reference: &'a ScfReference,
    pub evaluator: &'a E,
}

impl<E: DerivativeEvaluator> GradientContext<'_, E> {
    pub fn molecule(&self) -> &Molecule {
        self.basis.molecule()
    }
}

/// The four independent pieces of the RHF gradient, each `natom x 3`.
#[derive(Debug, Clone)]
pub struct GradientBreakdown {
    pub nuclear_repulsion: DMatrix<f64>,
    pub one_electron: DMatrix<f64>,
    pub overlap: DMatrix<f64>,
    pub two_electron: DMatrix<f64>,
}

impl GradientBreakdown {
    /// Sum the contributions in the fixed order nuclear, one-electron,
    /// overlap, two-electron.
    pub fn assemble(&self, natom: usize) -> Result<DMatrix<f64>> {
        let ordered = [
            ("nuclear repulsion gradient", &self.nuclear_repulsion),
            ("one-electron gradient", &self.one_electron),
            ("overlap gradient", &self.overlap),
            ("two-electron gradient", &self.two_electron),
        ];

        for (label, contribution) in ordered {
            if contribution.shape() != (natom, 3) {
                return Err(DerivError::shape(label, (natom, 3), contribution.shape()));
            }
        }

        let mut total = DMatrix::zeros(natom, 3);
        for (_, contribution) in ordered {
            total += contribution;
        }
        Ok(total)
    }
}

/// Result of one gradient evaluation.
#[derive(Debug, Clone)]
pub struct ScfGradient {
    pub breakdown: GradientBreakdown,
    pub total: DMatrix<f64>,
    pub densities: Densities,
}

/// Evaluate the closed-shell SCF gradient: transform the coefficients to the
/// AO basis, build Q and W, collect the four contributions and sum them.
pub fn compute_gradient<E: DerivativeEvaluator>(ctx: &GradientContext<'_, E>) -> Result<ScfGradient> {
    let molecule = ctx.molecule();
    let natom = molecule.natom();

    if ctx.transform.nbf() != ctx.basis.nbf() {
        return Err(DerivError::dimension(
            "AO side of the SO transform",
            ctx.basis.nbf(),
            ctx.transform.nbf(),
        ));
    }

    let cao = so_block_to_ao(ctx.reference.ca(), ctx.transform)?;
    let densities = build_densities(
        &cao,
        ctx.reference.epsilon_a(),
        ctx.reference.doccpi(),
        ctx.reference.nmopi(),
    )?;

    let breakdown = GradientBreakdown {
        nuclear_repulsion: molecule.nuclear_repulsion_energy_deriv1(),
        one_electron: ctx.evaluator.one_electron_derivative(&densities.q)?,
        overlap: ctx.evaluator.overlap_derivative(&densities.w)?,
        two_electron: ctx.evaluator.two_electron_derivative(&densities.q)?,
    };

    let total = breakdown.assemble(natom)?;

    log_atom_vector("Nuclear repulsion gradient", molecule, &breakdown.nuclear_repulsion);
    log_atom_vector("One-electron gradient", molecule, &breakdown.one_electron);
    log_atom_vector("Overlap gradient", molecule, &breakdown.overlap);
    log_atom_vector("Two-electron gradient", molecule, &breakdown.two_electron);
    log_atom_vector("SCF gradient", molecule, &total);

    Ok(ScfGradient {
        breakdown,
        total,
        densities,
    })
}

/// Log an `natom x 3` matrix one atom per line.
pub fn log_atom_vector(label: &str, molecule: &Molecule, matrix: &DMatrix<f64>) {
    info!("\n  -{label}:");
    info!("     Atom            X                  Y                   Z");
    info!("    ------   -----------------  -----------------  -----------------");
    for (idx, atom) in molecule.atoms().iter().enumerate().take(matrix.nrows()) {
        info!(
            "    {:>3} {:<2}  {:>17.12}  {:>17.12}  {:>17.12}",
            idx + 1,
            atom.symbol(),
            matrix[(idx, 0)],
            matrix[(idx, 1)],
            matrix[(idx, 2)]
        );
    }
}

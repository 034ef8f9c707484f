use crate::gradient_impl::ScfGradient;
use crate::system_impl::{BasisSet, ScfReference};
use tracing::info;

pub fn report_calculation_info(basis: &BasisSet, reference: &ScfReference) {
    let molecule = basis.molecule();

    info!("\n  -Calculation information:");
    info!("    Basis set:            {}", basis.name());
    info!("    Number of atoms:      {:>5}", molecule.natom());
    info!("    Number of shells:     {:>5}", basis.nshell());
    info!("    Number of primitives: {:>5}", basis.nprimitive());
    info!("    Number of AO:         {:>5}", basis.nao());
    info!("    Number of SO:         {:>5}", basis.nbf());
    info!("    Number of irreps:     {:>5}", reference.nirrep());
    info!("    Doubly occupied:      {:?}", reference.doccpi());
    info!("    Nuclear repulsion:    {:.10}", molecule.nuclear_repulsion_energy());
    info!("    Reference energy:     {:.10}", reference.energy());
}

pub fn report_gradient_summary(gradient: &ScfGradient) {
    let rms = (gradient.total.norm_squared() / gradient.total.len() as f64).sqrt();
    let max = gradient.total.amax();
    info!("\nGradient computed: max |g| = {:.6e}, rms g = {:.6e}", max, rms);
}

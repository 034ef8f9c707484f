use crate::error::{DerivError, Result};
use crate::symmetry_impl::Dimension;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

/// AO-basis densities of the doubly occupied orbitals.
#[derive(Debug, Clone)]
pub struct Densities {
    /// Q = sum_i C_mi C_ni
    pub q: DMatrix<f64>,
    /// W = sum_i C_mi C_ni e_i
    pub w: DMatrix<f64>,
}

/// Build Q and W from AO coefficients whose MO columns are grouped by irrep.
///
/// Orbitals `0..doccpi[h]` of every irrep contribute, in irrep order and then
/// orbital order. No occupation factor is applied.
pub fn build_densities(
    cao: &DMatrix<f64>,
    epsilon: &[DVector<f64>],
    doccpi: &[usize],
    nmopi: &Dimension,
) -> Result<Densities> {
    let occupied = occupied_orbitals(cao, epsilon, doccpi, nmopi)?;

    let unordered = unordered_irreps(epsilon, doccpi);
    if !unordered.is_empty() {
        warn!(
            "Orbital energies are not ascending in irreps {:?}; using the first doccpi orbitals as given",
            unordered
        );
    }

    let nbf = cao.nrows();
    let mut q = DMatrix::zeros(nbf, nbf);
    let mut w = DMatrix::zeros(nbf, nbf);

    for m in 0..nbf {
        for n in 0..nbf {
            let mut qsum = 0.0;
            let mut wsum = 0.0;
            for &(column, energy) in &occupied {
                let product = cao[(m, column)] * cao[(n, column)];
                qsum += product;
                wsum += product * energy;
            }
            q[(m, n)] = qsum;
            w[(m, n)] = wsum;
        }
    }

    debug!(
        "Built {}x{} densities from {} doubly occupied orbitals",
        nbf,
        nbf,
        occupied.len()
    );

    Ok(Densities { q, w })
}

/// Flat MO column and orbital energy of every doubly occupied orbital, in
/// summation order.
fn occupied_orbitals(
    cao: &DMatrix<f64>,
    epsilon: &[DVector<f64>],
    doccpi: &[usize],
    nmopi: &Dimension,
) -> Result<Vec<(usize, f64)>> {
    if doccpi.len() != nmopi.n_irrep() {
        return Err(DerivError::dimension(
            "doubly occupied orbitals per irrep",
            nmopi.n_irrep(),
            doccpi.len(),
        ));
    }
    if epsilon.len() != nmopi.n_irrep() {
        return Err(DerivError::dimension(
            "orbital energy irreps",
            nmopi.n_irrep(),
            epsilon.len(),
        ));
    }
    if cao.ncols() != nmopi.sum() {
        return Err(DerivError::dimension(
            "MO columns of the AO coefficients",
            nmopi.sum(),
            cao.ncols(),
        ));
    }

    let mut occupied = Vec::with_capacity(doccpi.iter().sum());
    for (h, mo_offset) in nmopi.offsets().enumerate() {
        let available = nmopi[h].min(epsilon[h].len());
        if doccpi[h] > available {
            return Err(DerivError::OccupationOverflow {
                irrep: h,
                occupied: doccpi[h],
                available,
            });
        }
        for i in 0..doccpi[h] {
            occupied.push((mo_offset + i, epsilon[h][i]));
        }
    }

    Ok(occupied)
}

/// Irreps whose occupied orbital energies are not in ascending order.
pub fn unordered_irreps(epsilon: &[DVector<f64>], doccpi: &[usize]) -> Vec<usize> {
    epsilon
        .iter()
        .zip(doccpi)
        .enumerate()
        .filter(|(_, (energies, nocc))| {
            let occupied = &energies.as_slice()[..(**nocc).min(energies.len())];
            occupied.windows(2).any(|pair| pair[0] > pair[1])
        })
        .map(|(h, _)| h)
        .collect()
}

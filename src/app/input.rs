use crate::config::{Config, DerivativeTable, ReferenceParams, SymmetryParams};
use crate::deriv_impl::TabulatedDerivatives;
use crate::error::DerivError;
use crate::gradient_impl::GradientContext;
use crate::symmetry_impl::{BlockMatrix, Dimension, SoTransform};
use crate::system_impl::{Atom, BasisSet, Molecule, ScfReference};
use color_eyre::eyre::{eyre, Result, WrapErr};
use nalgebra::{DMatrix, DVector, Vector3};
use periodic_table_on_an_enum::Element;
use tracing::info;

/// Everything one gradient evaluation needs, built from a job file.
pub struct GradientJob {
    pub basis: BasisSet,
    pub transform: SoTransform,
    pub reference: ScfReference,
    pub derivatives: TabulatedDerivatives,
}

impl GradientJob {
    pub fn from_config(config: &Config) -> Result<Self> {
        let molecule = build_molecule(config)?;
        let natom = molecule.natom();

        let basis = BasisSet::new(
            config.basis.name.clone().unwrap_or_default(),
            molecule,
            config.basis.shells.clone(),
            config.basis.puream.unwrap_or(false),
        )?;
        let nbf = basis.nbf();

        let transform = match &config.symmetry {
            Some(symmetry) => build_transform(symmetry, nbf)?,
            None => c1_transform(nbf)?,
        };

        let reference = config
            .reference
            .as_ref()
            .ok_or_else(|| DerivError::MissingInput("no SCF reference in the job file".to_string()))?;
        let reference = build_reference(reference, transform.nsopi())
            .wrap_err("Failed to read the SCF reference")?;

        let derivatives = build_derivatives(config, natom, nbf)
            .wrap_err("Failed to read the derivative integrals")?;

        Ok(GradientJob {
            basis,
            transform,
            reference,
            derivatives,
        })
    }

    pub fn context(&self) -> GradientContext<'_, TabulatedDerivatives> {
        GradientContext {
            basis: &self.basis,
            transform: &self.transform,
            reference: &self.reference,
            evaluator: &self.derivatives,
        }
    }

    pub fn molecule(&self) -> &Molecule {
        self.basis.molecule()
    }
}

fn build_molecule(config: &Config) -> Result<Molecule> {
    info!("\nPreparing geometry...");

    let mut atoms = Vec::with_capacity(config.geometry.len());
    for atom in &config.geometry {
        let element = Element::from_symbol(&atom.element)
            .ok_or_else(|| eyre!("Invalid element symbol: {}", atom.element))?;
        let position = Vector3::new(atom.coords[0], atom.coords[1], atom.coords[2]);
        atoms.push(Atom::new(element, position));
    }

    Ok(Molecule::new(atoms)?)
}

/// Without symmetry the SOs are the AOs.
fn c1_transform(nbf: usize) -> Result<SoTransform> {
    let dim = Dimension::new(vec![nbf]);
    Ok(SoTransform::new(
        BlockMatrix::identity("USO -> AO", &dim),
        BlockMatrix::identity("AO -> SO", &dim),
    )?)
}

fn build_transform(symmetry: &SymmetryParams, nbf: usize) -> Result<SoTransform> {
    let nsopi = Dimension::new(symmetry.nsopi.clone());
    let nbfpi = Dimension::uniform(nsopi.n_irrep(), nbf);

    let uso_to_ao = blocks_from_rows("USO -> AO", &symmetry.uso_to_ao, &nsopi, &nbfpi)?;
    let ao_to_so = blocks_from_rows("AO -> SO", &symmetry.ao_to_so, &nbfpi, &nsopi)?;
    Ok(SoTransform::new(uso_to_ao, ao_to_so)?)
}

fn build_reference(params: &ReferenceParams, nsopi: &Dimension) -> Result<ScfReference> {
    let nmopi = Dimension::new(params.nmopi.clone().unwrap_or_else(|| nsopi.as_slice().to_vec()));
    let ca = blocks_from_rows("Ca", &params.ca, nsopi, &nmopi)?;
    let epsilon_a = params
        .epsilon_a
        .iter()
        .map(|energies| DVector::from_vec(energies.clone()))
        .collect();

    Ok(ScfReference::new(
        ca,
        epsilon_a,
        params.doccpi.clone(),
        params.energy,
        params.converged.unwrap_or(true),
    )?)
}

fn build_derivatives(config: &Config, natom: usize, nbf: usize) -> Result<TabulatedDerivatives> {
    let tables = &config.derivatives;
    let pairs = nbf * nbf;
    let mut derivatives = TabulatedDerivatives::new(natom, nbf);

    for table in &tables.overlap {
        let ds = table_matrix("dS", table, (nbf, nbf))?;
        derivatives.insert_overlap(table.atom, table.axis, ds)?;
    }
    for table in &tables.one_electron {
        let dh = table_matrix("dH", table, (nbf, nbf))?;
        derivatives.insert_one_electron(table.atom, table.axis, dh)?;
    }
    for table in &tables.two_electron {
        let deri = table_matrix("d(mn|ls)", table, (pairs, pairs))?;
        derivatives.insert_two_electron(table.atom, table.axis, deri)?;
    }

    Ok(derivatives)
}

fn table_matrix(
    kind: &str,
    table: &DerivativeTable,
    shape: (usize, usize),
) -> std::result::Result<DMatrix<f64>, DerivError> {
    matrix_from_rows(
        &format!("{kind} table for atom {} axis {}", table.atom, table.axis),
        &table.matrix,
        shape,
    )
}

fn blocks_from_rows(
    name: &str,
    blocks: &[Vec<Vec<f64>>],
    rowspi: &Dimension,
    colspi: &Dimension,
) -> std::result::Result<BlockMatrix, DerivError> {
    if blocks.len() != rowspi.n_irrep() {
        return Err(DerivError::dimension(
            format!("{name}: number of blocks"),
            rowspi.n_irrep(),
            blocks.len(),
        ));
    }

    let dense = blocks
        .iter()
        .enumerate()
        .map(|(h, rows)| matrix_from_rows(&format!("{name} block {h}"), rows, (rowspi[h], colspi[h])))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    BlockMatrix::new(name, rowspi.clone(), colspi.clone(), dense)
}

/// Dense matrix from row-major nested vectors, rejecting ragged or
/// wrongly sized input.
pub fn matrix_from_rows(
    context: &str,
    rows: &[Vec<f64>],
    shape: (usize, usize),
) -> std::result::Result<DMatrix<f64>, DerivError> {
    let (nrows, ncols) = shape;
    if rows.len() != nrows {
        let found_cols = rows.first().map_or(0, Vec::len);
        return Err(DerivError::shape(context, shape, (rows.len(), found_cols)));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
        return Err(DerivError::shape(context, shape, (nrows, row.len())));
    }

    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

use super::block_matrix::BlockMatrix;
use super::dimension::{block_offsets, Dimension};
use crate::error::{DerivError, Result};
use nalgebra::DMatrix;
use tracing::debug;

/// The pair of SO<->AO lookup tables produced by the petite list.
///
/// Block `h` of `uso_to_ao` is `nso[h] x nbf`, block `h` of `ao_to_so` is
/// `nbf x nso[h]`.
#[derive(Debug, Clone)]
pub struct SoTransform {
    uso_to_ao: BlockMatrix,
    ao_to_so: BlockMatrix,
    nbf: usize,
}

impl SoTransform {
    pub fn new(uso_to_ao: BlockMatrix, ao_to_so: BlockMatrix) -> Result<Self> {
        if uso_to_ao.nirrep() == 0 {
            return Err(DerivError::MissingInput(
                "SO transform has no irreps".to_string(),
            ));
        }
        if ao_to_so.nirrep() != uso_to_ao.nirrep() {
            return Err(DerivError::dimension(
                "AO->SO irrep count",
                uso_to_ao.nirrep(),
                ao_to_so.nirrep(),
            ));
        }

        let nbf = uso_to_ao.colspi()[0];
        for h in 0..uso_to_ao.nirrep() {
            if uso_to_ao.colspi()[h] != nbf {
                return Err(DerivError::dimension(
                    format!("USO->AO columns of irrep {h}"),
                    nbf,
                    uso_to_ao.colspi()[h],
                ));
            }
            if ao_to_so.rowspi()[h] != nbf {
                return Err(DerivError::dimension(
                    format!("AO->SO rows of irrep {h}"),
                    nbf,
                    ao_to_so.rowspi()[h],
                ));
            }
            if ao_to_so.colspi()[h] != uso_to_ao.rowspi()[h] {
                return Err(DerivError::dimension(
                    format!("AO->SO columns of irrep {h}"),
                    uso_to_ao.rowspi()[h],
                    ao_to_so.colspi()[h],
                ));
            }
        }

        Ok(SoTransform {
            uso_to_ao,
            ao_to_so,
            nbf,
        })
    }

    pub fn nirrep(&self) -> usize {
        self.uso_to_ao.nirrep()
    }

    pub fn nbf(&self) -> usize {
        self.nbf
    }

    pub fn nsopi(&self) -> &Dimension {
        self.uso_to_ao.rowspi()
    }

    pub fn uso_to_ao(&self) -> &BlockMatrix {
        &self.uso_to_ao
    }

    pub fn ao_to_so(&self) -> &BlockMatrix {
        &self.ao_to_so
    }

    /// Stack the USO->AO blocks on top of each other into one `nso x nbf` matrix.
    pub fn stacked_uso_to_ao(&self) -> DMatrix<f64> {
        let nsopi = self.nsopi();
        let mut stacked = DMatrix::zeros(nsopi.sum(), self.nbf);
        for (h, so_offset) in nsopi.offsets().enumerate() {
            let block = self.uso_to_ao.block(h);
            for m in 0..nsopi[h] {
                stacked.row_mut(so_offset + m).copy_from(&block.row(m));
            }
        }
        stacked
    }
}

/// Express SO-basis MO coefficients in the AO basis.
///
/// The coefficient blocks are gathered into a flat `nso x nmo` matrix and the
/// result is `U^T * Cso`, `U` being the stacked USO->AO table. The MO columns
/// keep their per-irrep order and offsets.
pub fn so_block_to_ao(coefficients: &BlockMatrix, transform: &SoTransform) -> Result<DMatrix<f64>> {
    let nsopi = transform.nsopi();
    if coefficients.nirrep() != transform.nirrep() {
        return Err(DerivError::dimension(
            format!("{}: irrep count", coefficients.name()),
            transform.nirrep(),
            coefficients.nirrep(),
        ));
    }
    for h in 0..nsopi.n_irrep() {
        if coefficients.rowspi()[h] != nsopi[h] {
            return Err(DerivError::dimension(
                format!("{}: SO rows of irrep {h}", coefficients.name()),
                nsopi[h],
                coefficients.rowspi()[h],
            ));
        }
    }

    let usotoao = transform.stacked_uso_to_ao();
    let cso = coefficients.to_dense();
    debug!(
        "Transforming {} ({}x{}) to the AO basis ({} functions)",
        coefficients.name(),
        cso.nrows(),
        cso.ncols(),
        transform.nbf()
    );

    Ok(usotoao.tr_mul(&cso))
}

/// Bring AO-basis MO coefficients back into symmetry blocks using the AO->SO table.
///
/// Only the diagonal irrep blocks are kept, so coefficients that mix irreps
/// are dropped.
pub fn ao_to_so_block(
    cao: &DMatrix<f64>,
    transform: &SoTransform,
    nmopi: &Dimension,
) -> Result<BlockMatrix> {
    let nsopi = transform.nsopi();
    if nmopi.n_irrep() != transform.nirrep() {
        return Err(DerivError::dimension(
            "MO irrep count",
            transform.nirrep(),
            nmopi.n_irrep(),
        ));
    }
    if cao.nrows() != transform.nbf() || cao.ncols() != nmopi.sum() {
        return Err(DerivError::shape(
            "AO coefficients",
            (transform.nbf(), nmopi.sum()),
            (cao.nrows(), cao.ncols()),
        ));
    }

    let blocks = block_offsets(nsopi, nmopi)
        .map(|offset| {
            let mo_columns = cao.columns(offset.col_offset, nmopi[offset.irrep]);
            transform.ao_to_so().block(offset.irrep).tr_mul(&mo_columns)
        })
        .collect();

    BlockMatrix::new("Cso", nsopi.clone(), nmopi.clone(), blocks)
}

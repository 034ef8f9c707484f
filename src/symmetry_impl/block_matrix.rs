use super::dimension::{block_offsets, Dimension};
use crate::error::{DerivError, Result};
use nalgebra::DMatrix;

/// Matrix stored as one dense block per irrep; elements between different
/// irreps are zero and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix {
    name: String,
    rowspi: Dimension,
    colspi: Dimension,
    blocks: Vec<DMatrix<f64>>,
}

impl BlockMatrix {
    /// Build a blocked matrix, checking every block against the declared sizes.
    pub fn new(
        name: impl Into<String>,
        rowspi: Dimension,
        colspi: Dimension,
        blocks: Vec<DMatrix<f64>>,
    ) -> Result<Self> {
        let name = name.into();
        if rowspi.n_irrep() != colspi.n_irrep() {
            return Err(DerivError::dimension(
                format!("{name}: column irrep count"),
                rowspi.n_irrep(),
                colspi.n_irrep(),
            ));
        }
        if blocks.len() != rowspi.n_irrep() {
            return Err(DerivError::dimension(
                format!("{name}: number of blocks"),
                rowspi.n_irrep(),
                blocks.len(),
            ));
        }
        for (h, block) in blocks.iter().enumerate() {
            if block.nrows() != rowspi[h] {
                return Err(DerivError::dimension(
                    format!("{name}: rows of irrep {h}"),
                    rowspi[h],
                    block.nrows(),
                ));
            }
            if block.ncols() != colspi[h] {
                return Err(DerivError::dimension(
                    format!("{name}: columns of irrep {h}"),
                    colspi[h],
                    block.ncols(),
                ));
            }
        }

        Ok(BlockMatrix {
            name,
            rowspi,
            colspi,
            blocks,
        })
    }

    pub fn identity(name: impl Into<String>, dim: &Dimension) -> Self {
        BlockMatrix {
            name: name.into(),
            rowspi: dim.clone(),
            colspi: dim.clone(),
            blocks: dim
                .as_slice()
                .iter()
                .map(|&n| DMatrix::identity(n, n))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nirrep(&self) -> usize {
        self.blocks.len()
    }

    pub fn rowspi(&self) -> &Dimension {
        &self.rowspi
    }

    pub fn colspi(&self) -> &Dimension {
        &self.colspi
    }

    pub fn block(&self, irrep: usize) -> &DMatrix<f64> {
        &self.blocks[irrep]
    }

    pub fn get(&self, irrep: usize, row: usize, col: usize) -> f64 {
        self.blocks[irrep][(row, col)]
    }

    /// Gather the blocks onto the diagonal of one dense matrix.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.rowspi.sum(), self.colspi.sum());
        for offset in block_offsets(&self.rowspi, &self.colspi) {
            let block = &self.blocks[offset.irrep];
            dense
                .view_mut(
                    (offset.row_offset, offset.col_offset),
                    (block.nrows(), block.ncols()),
                )
                .copy_from(block);
        }
        dense
    }
}

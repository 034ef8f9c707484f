use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Number of orbitals carried by each irreducible representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimension(Vec<usize>);

impl Dimension {
    pub fn new(per_irrep: Vec<usize>) -> Self {
        Dimension(per_irrep)
    }

    /// A dimension with the same size in every irrep, e.g. the AO side of the SO transform.
    pub fn uniform(n_irrep: usize, size: usize) -> Self {
        Dimension(vec![size; n_irrep])
    }

    pub fn n_irrep(&self) -> usize {
        self.0.len()
    }

    /// Total number of orbitals over all irreps.
    pub fn sum(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Running offset of each irrep's first orbital in the flattened space.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().scan(0usize, |acc, &size| {
            let offset = *acc;
            *acc += size;
            Some(offset)
        })
    }
}

impl Index<usize> for Dimension {
    type Output = usize;

    fn index(&self, irrep: usize) -> &usize {
        &self.0[irrep]
    }
}

impl From<Vec<usize>> for Dimension {
    fn from(per_irrep: Vec<usize>) -> Self {
        Dimension(per_irrep)
    }
}

/// Where one irrep block starts inside the flattened (row, column) space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOffset {
    pub irrep: usize,
    pub row_offset: usize,
    pub col_offset: usize,
}

/// Scan over paired row/column block sizes, yielding the start of every block.
///
/// Both dimensions are expected to have the same irrep count; extra irreps on
/// either side are ignored.
pub fn block_offsets<'a>(
    rows: &'a Dimension,
    cols: &'a Dimension,
) -> impl Iterator<Item = BlockOffset> + 'a {
    rows.as_slice()
        .iter()
        .zip(cols.as_slice())
        .enumerate()
        .scan((0usize, 0usize), |acc, (irrep, (&n_rows, &n_cols))| {
            let offset = BlockOffset {
                irrep,
                row_offset: acc.0,
                col_offset: acc.1,
            };
            acc.0 += n_rows;
            acc.1 += n_cols;
            Some(offset)
        })
}

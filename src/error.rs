//! Error type shared by the gradient components

use thiserror::Error;

/// Failures of a gradient evaluation. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum DerivError {
    /// Upstream state needed before anything can be computed is absent.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Symmetry block sizes disagree between two collaborators.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// A dense matrix does not have the agreed shape.
    #[error("shape mismatch in {context}: expected {expected_rows}x{expected_cols}, found {found_rows}x{found_cols}")]
    ShapeMismatch {
        context: String,
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("irrep {irrep} has {occupied} doubly occupied orbitals but only {available} are available")]
    OccupationOverflow {
        irrep: usize,
        occupied: usize,
        available: usize,
    },

    #[error("failed to write gradient file: {0}")]
    Io(#[from] std::io::Error),
}

impl DerivError {
    pub(crate) fn dimension(context: impl Into<String>, expected: usize, found: usize) -> Self {
        DerivError::DimensionMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    pub(crate) fn shape(
        context: impl Into<String>,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        DerivError::ShapeMismatch {
            context: context.into(),
            expected_rows: expected.0,
            expected_cols: expected.1,
            found_rows: found.0,
            found_cols: found.1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DerivError>;

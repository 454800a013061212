//! Tipos de erro para ods-lp

use thiserror::Error;

use ods_chain::ChainError;

/// Resultado customizado para a síntese de políticas
pub type LpResult<T> = Result<T, LpError>;

/// Erros que podem ocorrer na montagem e resolução do LP
#[derive(Debug, Clone, Error)]
pub enum LpError {
    #[error("Row {row} has {got} coefficients, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("Expected exactly one objective row, found {0}")]
    ObjectiveRowCount(usize),

    #[error("Problem has no constraint rows")]
    NoConstraintRows,

    #[error("Fixed-zero column {column} out of range")]
    FixedColumnOutOfRange { column: usize },

    #[error("LP is infeasible")]
    Infeasible,

    #[error("LP is unbounded")]
    Unbounded,

    #[error("No effective policy found across {samples} eta sample(s)")]
    NoEffectivePolicy { samples: usize },

    #[error(transparent)]
    Chain(#[from] ChainError),
}

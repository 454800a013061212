//! Tipos de erro para ods-chain

use thiserror::Error;

use ods_core::CoreError;

/// Resultado customizado para operações sobre a cadeia
pub type ChainResult<T> = Result<T, ChainError>;

/// Erros que podem ocorrer na construção da cadeia
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

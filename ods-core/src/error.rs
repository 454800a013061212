//! Tipos de erro para ods-core

use thiserror::Error;

/// Resultado customizado para operações do modelo do dispositivo
pub type CoreResult<T> = Result<T, CoreError>;

/// Erros que podem ocorrer no modelo do dispositivo
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("Config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Queue {queue} is full")]
    QueueFull { queue: usize },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

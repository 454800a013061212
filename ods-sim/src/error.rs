//! Tipos de erro para ods-sim

use thiserror::Error;

use ods_core::CoreError;
use ods_lp::LpError;

/// Resultado customizado para a simulação
pub type SimResult<T> = Result<T, SimError>;

/// Erros que podem ocorrer na simulação e no relatório
#[derive(Debug, Clone, Error)]
pub enum SimError {
    #[error("Task {task_id} carries more than one terminal event")]
    DuplicateTerminalEvent { task_id: u64 },

    #[error("Task {task_id} has events but no arrival")]
    MissingArrival { task_id: u64 },

    #[error("A batch worker panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Lp(#[from] LpError),
}

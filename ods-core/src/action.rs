//! Ações de agendamento
//!
//! Conjunto fechado de variantes; o despacho é sempre por pattern match
//! exaustivo. Cada ação carrega um índice de ordem de aplicação usado como
//! índice menor da coluna do LP.

use serde::{Deserialize, Serialize};

/// Ação de agendamento em um slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Não faz nada
    NoOp,
    /// Despacha a tarefa mais antiga da fila para a CPU
    AddToCpu { queue: usize },
    /// Despacha a tarefa mais antiga da fila para a unidade de transmissão
    AddToTu { queue: usize },
    /// Despacha duas tarefas, uma para cada recurso
    AddToBoth { cpu_queue: usize, tu_queue: usize },
}

impl Action {
    /// Número total de ações para `num_queues` filas
    pub fn count(num_queues: usize) -> usize {
        1 + 2 * num_queues + num_queues * num_queues
    }

    /// Índice de ordem de aplicação (índice menor da coluna do LP)
    pub fn order_index(&self, num_queues: usize) -> usize {
        match *self {
            Action::NoOp => 0,
            Action::AddToCpu { queue } => 1 + queue,
            Action::AddToTu { queue } => 1 + num_queues + queue,
            Action::AddToBoth { cpu_queue, tu_queue } => {
                1 + 2 * num_queues + cpu_queue * num_queues + tu_queue
            }
        }
    }

    /// Inverso exato de [`Action::order_index`]
    ///
    /// # Panics
    ///
    /// Aborta se o índice estiver fora de `0..Action::count(num_queues)` —
    /// um descompasso de contagem de colunas é erro de programação.
    pub fn from_order_index(index: usize, num_queues: usize) -> Action {
        assert!(
            index < Self::count(num_queues),
            "action order index {index} out of range for {num_queues} queue(s)"
        );
        if index == 0 {
            Action::NoOp
        } else if index < 1 + num_queues {
            Action::AddToCpu { queue: index - 1 }
        } else if index < 1 + 2 * num_queues {
            Action::AddToTu {
                queue: index - 1 - num_queues,
            }
        } else {
            let offset = index - 1 - 2 * num_queues;
            Action::AddToBoth {
                cpu_queue: offset / num_queues,
                tu_queue: offset % num_queues,
            }
        }
    }

    /// Fila despachada para a CPU por esta ação, se houver
    pub fn cpu_queue(&self) -> Option<usize> {
        match *self {
            Action::AddToCpu { queue } => Some(queue),
            Action::AddToBoth { cpu_queue, .. } => Some(cpu_queue),
            _ => None,
        }
    }

    /// Fila despachada para a TU por esta ação, se houver
    pub fn tu_queue(&self) -> Option<usize> {
        match *self {
            Action::AddToTu { queue } => Some(queue),
            Action::AddToBoth { tu_queue, .. } => Some(tu_queue),
            _ => None,
        }
    }

    /// A ação despacha pelo menos uma tarefa?
    pub fn is_dispatch(&self) -> bool {
        !matches!(self, Action::NoOp)
    }
}

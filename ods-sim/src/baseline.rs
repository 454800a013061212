//! Políticas de referência determinísticas
//!
//! Todas escolhem a fila com maior atraso acumulado (maior ocupação), com o
//! menor índice em caso de empate, e só devolvem ações legais.

use ods_core::prelude::*;

use crate::policy::{ExecutionState, OffloadPolicy};

/// Fila não vazia com maior ocupação; menor índice desempata
fn busiest_queue(lengths: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (queue, &len) in lengths.iter().enumerate() {
        if len >= 1 && best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((queue, len));
        }
    }
    best.map(|(queue, _)| queue)
}

fn queue_lengths(state: &DeviceState) -> Vec<usize> {
    (0..state.num_queues()).map(|q| state.queue_len(q)).collect()
}

/// Usa os dois recursos quando possível, preferindo preencher `first` antes
fn greedy(state: &DeviceState, local_first: bool) -> Action {
    let mut lengths = queue_lengths(state);
    match (state.is_cpu_idle(), state.is_tu_idle()) {
        (true, true) => {
            let Some(first) = busiest_queue(&lengths) else {
                return Action::NoOp;
            };
            lengths[first] -= 1;
            let second = busiest_queue(&lengths);
            match (local_first, second) {
                (true, Some(tu_queue)) => Action::AddToBoth {
                    cpu_queue: first,
                    tu_queue,
                },
                (true, None) => Action::AddToCpu { queue: first },
                (false, Some(cpu_queue)) => Action::AddToBoth {
                    cpu_queue,
                    tu_queue: first,
                },
                (false, None) => Action::AddToTu { queue: first },
            }
        }
        (true, false) => busiest_queue(&lengths)
            .map_or(Action::NoOp, |queue| Action::AddToCpu { queue }),
        (false, true) => busiest_queue(&lengths)
            .map_or(Action::NoOp, |queue| Action::AddToTu { queue }),
        (false, false) => Action::NoOp,
    }
}

/// Despacha só para a CPU
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOnly;

impl OffloadPolicy for LocalOnly {
    fn name(&self) -> &'static str {
        "local-only"
    }

    fn decide(&mut self, execution: &ExecutionState) -> Action {
        let state = &execution.state;
        if state.is_cpu_idle() {
            busiest_queue(&queue_lengths(state))
                .map_or(Action::NoOp, |queue| Action::AddToCpu { queue })
        } else {
            Action::NoOp
        }
    }
}

/// Despacha só para a unidade de transmissão
#[derive(Debug, Clone, Copy, Default)]
pub struct OffloadOnly;

impl OffloadPolicy for OffloadOnly {
    fn name(&self) -> &'static str {
        "offload-only"
    }

    fn decide(&mut self, execution: &ExecutionState) -> Action {
        let state = &execution.state;
        if state.is_tu_idle() {
            busiest_queue(&queue_lengths(state))
                .map_or(Action::NoOp, |queue| Action::AddToTu { queue })
        } else {
            Action::NoOp
        }
    }
}

/// Usa os dois recursos, preenchendo a CPU primeiro
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyLocalFirst;

impl OffloadPolicy for GreedyLocalFirst {
    fn name(&self) -> &'static str {
        "greedy-local-first"
    }

    fn decide(&mut self, execution: &ExecutionState) -> Action {
        greedy(&execution.state, true)
    }
}

/// Usa os dois recursos, preenchendo a transmissão primeiro
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyOffloadFirst;

impl OffloadPolicy for GreedyOffloadFirst {
    fn name(&self) -> &'static str {
        "greedy-offload-first"
    }

    fn decide(&mut self, execution: &ExecutionState) -> Action {
        greedy(&execution.state, false)
    }
}

//! Simulador de eventos discretos do dispositivo
//!
//! Reproduz slot a slot a mesma dinâmica que a cadeia descreve em
//! distribuição: decisão, despacho, avanço da CPU, tentativa de partida da
//! transmissão e chegadas. Serve de validação independente para o atraso
//! previsto pelo LP.
//!
//! Ordem dentro de um slot:
//! 1. consulta a política (NoOp forçado se a potência média excede pMax);
//! 2. aplica a ação, atribuindo identificadores às tarefas despachadas;
//! 3. avança uma fase da CPU ativa (potência local no slot);
//! 4. tenta uma partida da transmissão ativa com probabilidade beta
//!    (potência de rádio na tentativa bem-sucedida);
//! 5. sorteia uma chegada por fila com probabilidade alpha, descartando em
//!    fila cheia.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ods_core::prelude::*;

use crate::error::SimResult;
use crate::events::{EventKind, EventLog, SimulationReport, TaskId};
use crate::policy::{ExecutionState, OffloadPolicy};

/// Simulador de uma execução com horizonte e semente fixos
#[derive(Debug, Clone)]
pub struct Simulator {
    config: DeviceConfig,
    slots: u64,
    seed: u64,
}

impl Simulator {
    /// Cria um simulador para a configuração validada
    pub fn new(config: DeviceConfig, slots: u64, seed: u64) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            slots,
            seed,
        })
    }

    /// Executa o horizonte inteiro sob a política dada
    ///
    /// Duas execuções com a mesma configuração, semente e política produzem
    /// o mesmo relatório.
    pub fn run(&self, policy: &mut dyn OffloadPolicy) -> SimResult<SimulationReport> {
        let config = &self.config;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut log = EventLog::new();

        let mut state = DeviceState::empty(config.num_queues());
        // Slots de chegada das tarefas ainda não despachadas, FIFO por fila
        let mut pending_arrivals: Vec<VecDeque<u64>> =
            vec![VecDeque::new(); config.num_queues()];
        let mut cpu_task: Option<TaskId> = None;
        let mut tu_task: Option<TaskId> = None;
        let mut next_task_id: TaskId = 0;
        let mut total_power = 0.0;
        let mut dropped = 0u64;

        for slot in 0..self.slots {
            // 1. Decisão, com NoOp forçado acima do orçamento de potência
            let execution = ExecutionState {
                state: state.clone(),
                slot,
                cumulative_power: total_power,
            };
            let action = if execution.average_power() > config.power_cap {
                Action::NoOp
            } else {
                policy.decide(&execution)
            };

            // 2. Despacho: identificador atribuído aqui, chegada lembrada
            if let Some(queue) = action.cpu_queue() {
                assert!(
                    cpu_task.is_none(),
                    "CPU dispatch with task {cpu_task:?} still in service"
                );
                let task_id = Self::dispatch(
                    &mut pending_arrivals[queue],
                    &mut next_task_id,
                    &mut log,
                    slot,
                    EventKind::SentToCpu,
                );
                cpu_task = Some(task_id);
            }
            if let Some(queue) = action.tu_queue() {
                assert!(
                    tu_task.is_none(),
                    "TU dispatch with task {tu_task:?} still in service"
                );
                let task_id = Self::dispatch(
                    &mut pending_arrivals[queue],
                    &mut next_task_id,
                    &mut log,
                    slot,
                    EventKind::SentToTu,
                );
                if config.tu_packets == 0 {
                    // Sem pacotes a transmitir: conclui no slot do despacho
                    log.record(task_id, slot, EventKind::TransmittedByTu);
                } else {
                    tu_task = Some(task_id);
                }
            }
            state = state.apply_action(config, &action);

            // 3. CPU: uma seção por slot enquanto houver tarefa
            if !state.is_cpu_idle() {
                total_power += config.local_power;
                let (next, completed) = state.advance_cpu_if_active(config);
                state = next;
                if completed {
                    let task_id = cpu_task
                        .take()
                        .unwrap_or_else(|| panic!("CPU completed without an owner task"));
                    log.record(task_id, slot, EventKind::ProcessedByCpu);
                }
            }

            // 4. TU: tentativa de partida Bernoulli(beta)
            if !state.is_tu_idle() && rng.gen_range(0.0..1.0) < config.departure_rate {
                total_power += config.tx_power;
                let (next, completed) = state.advance_tu(config);
                state = next;
                if completed {
                    let task_id = tu_task
                        .take()
                        .unwrap_or_else(|| panic!("TU completed without an owner task"));
                    log.record(task_id, slot, EventKind::TransmittedByTu);
                }
            }

            // 5. Chegadas Bernoulli(alpha) por fila
            for queue in 0..config.num_queues() {
                if rng.gen_range(0.0..1.0) < config.arrival_rates[queue] {
                    match state.admit_task(config, queue) {
                        Ok(next) => {
                            state = next;
                            pending_arrivals[queue].push_back(slot);
                        }
                        Err(CoreError::QueueFull { .. }) => dropped += 1,
                        Err(error) => return Err(error.into()),
                    }
                }
            }
        }

        log.create_report(config, dropped, total_power, self.slots)
    }

    /// Retira a chegada mais antiga da fila e registra o despacho
    fn dispatch(
        pending: &mut VecDeque<u64>,
        next_task_id: &mut TaskId,
        log: &mut EventLog,
        slot: u64,
        kind: EventKind,
    ) -> TaskId {
        let arrival_slot = pending
            .pop_front()
            .unwrap_or_else(|| panic!("dispatch from a queue with no pending arrival"));
        let task_id = *next_task_id;
        *next_task_id += 1;
        log.record(task_id, arrival_slot, EventKind::Arrival);
        log.record(task_id, slot, kind);
        task_id
    }
}

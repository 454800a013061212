//! Registro de eventos por tarefa e relatório agregado
//!
//! O simulador só registra fatos crus; toda a aritmética de atraso vive na
//! agregação do relatório, que valida o ciclo de vida de cada tarefa.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ods_core::DeviceConfig;

use crate::error::{SimError, SimResult};

/// Identificador de tarefa, atribuído no despacho
pub type TaskId = u64;

/// Tipo de evento no ciclo de vida de uma tarefa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Tarefa chegou à fila (slot registrado é o da chegada)
    Arrival,
    /// Tarefa despachada para a CPU
    SentToCpu,
    /// Tarefa despachada para a unidade de transmissão
    SentToTu,
    /// Processamento local concluído
    ProcessedByCpu,
    /// Transmissão à nuvem concluída
    TransmittedByTu,
}

impl EventKind {
    /// Evento que encerra o ciclo de vida da tarefa?
    pub fn is_terminal(self) -> bool {
        matches!(self, EventKind::ProcessedByCpu | EventKind::TransmittedByTu)
    }
}

/// Evento datado de uma tarefa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// Tarefa a que o evento pertence
    pub task_id: TaskId,
    /// Slot em que o evento ocorreu
    pub slot: u64,
    /// Tipo do evento
    pub kind: EventKind,
}

/// Registro de eventos de uma execução
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<TaskEvent>,
}

/// Relatório agregado de uma execução
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Atraso médio das tarefas concluídas, em slots (RTT da nuvem incluído)
    pub average_delay: f64,
    /// Potência média por slot
    pub average_power: f64,
    /// Tarefas concluídas dentro do horizonte
    pub completed: u64,
    /// Chegadas descartadas por fila cheia
    pub dropped: u64,
    /// Tarefas despachadas mas não concluídas no horizonte
    pub in_flight: u64,
    /// Houve ao menos uma conclusão com atraso finito?
    pub effective: bool,
}

impl EventLog {
    /// Registro vazio
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra um evento
    pub fn record(&mut self, task_id: TaskId, slot: u64, kind: EventKind) {
        self.events.push(TaskEvent {
            task_id,
            slot,
            kind,
        });
    }

    /// Eventos na ordem de registro
    pub fn events(&self) -> &[TaskEvent] {
        &self.events
    }

    /// Agrega o registro em um relatório
    ///
    /// Tarefas sem evento terminal seguem em voo no horizonte: contadas à
    /// parte, excluídas da média de atraso. Mais de um terminal por tarefa é
    /// quebra de invariante do simulador.
    pub fn create_report(
        &self,
        config: &DeviceConfig,
        dropped: u64,
        total_power: f64,
        slots: u64,
    ) -> SimResult<SimulationReport> {
        struct Lifecycle {
            arrival: Option<u64>,
            terminal: Option<(u64, EventKind)>,
        }

        let mut lifecycles: BTreeMap<TaskId, Lifecycle> = BTreeMap::new();
        for event in &self.events {
            let lifecycle = lifecycles.entry(event.task_id).or_insert(Lifecycle {
                arrival: None,
                terminal: None,
            });
            if event.kind == EventKind::Arrival {
                lifecycle.arrival.get_or_insert(event.slot);
            } else if event.kind.is_terminal() {
                if lifecycle.terminal.is_some() {
                    return Err(SimError::DuplicateTerminalEvent {
                        task_id: event.task_id,
                    });
                }
                lifecycle.terminal = Some((event.slot, event.kind));
            }
        }

        let mut completed = 0u64;
        let mut in_flight = 0u64;
        let mut total_delay = 0.0;
        for (&task_id, lifecycle) in &lifecycles {
            let arrival = lifecycle
                .arrival
                .ok_or(SimError::MissingArrival { task_id })?;
            match lifecycle.terminal {
                Some((slot, kind)) => {
                    completed += 1;
                    let mut delay = (slot - arrival) as f64;
                    if kind == EventKind::TransmittedByTu {
                        delay += config.cloud_rtt;
                    }
                    total_delay += delay;
                }
                None => in_flight += 1,
            }
        }

        let average_delay = if completed > 0 {
            total_delay / completed as f64
        } else {
            f64::INFINITY
        };
        let average_power = if slots > 0 {
            total_power / slots as f64
        } else {
            0.0
        };
        Ok(SimulationReport {
            average_delay,
            average_power,
            completed,
            dropped,
            in_flight,
            effective: completed > 0 && average_delay.is_finite(),
        })
    }
}

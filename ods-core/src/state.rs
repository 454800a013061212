//! Estado do dispositivo
//!
//! Valor imutável: toda transição devolve um estado novo. Igualdade e hash
//! são estruturais; os invariantes de fase e de dono são verificados na
//! construção.
//!
//! Fases:
//! - TU: 0 = ociosa; k em 1..=tuPackets = k-ésimo pacote pendente. Admissão
//!   põe a fase em 1; cada partida bem-sucedida incrementa; sucesso na fase
//!   tuPackets conclui a transmissão.
//! - CPU: 0 = ociosa; -1 = tarefa recém-admitida ainda não avançada; k em
//!   1..=cpuSections-1 = em processamento. Avançar de cpuSections-1 conclui.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::config::DeviceConfig;
use crate::error::{CoreError, CoreResult};

/// Fase da CPU de uma tarefa recém-admitida
pub const CPU_PHASE_ADMITTED: i32 = -1;

/// Estado imutável do dispositivo
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceState {
    /// Tarefas enfileiradas, por fila
    queues: Vec<usize>,
    /// Fase da unidade de transmissão
    tu_phase: usize,
    /// Fila dona da transmissão em curso
    tu_owner: Option<usize>,
    /// Fase da CPU
    cpu_phase: i32,
    /// Fila dona do processamento em curso
    cpu_owner: Option<usize>,
}

impl DeviceState {
    /// Estado vazio: filas vazias, recursos ociosos
    pub fn empty(num_queues: usize) -> Self {
        Self {
            queues: vec![0; num_queues],
            tu_phase: 0,
            tu_owner: None,
            cpu_phase: 0,
            cpu_owner: None,
        }
    }

    /// Constrói um estado validado contra os limites da configuração
    pub fn new(
        config: &DeviceConfig,
        queues: Vec<usize>,
        tu_phase: usize,
        tu_owner: Option<usize>,
        cpu_phase: i32,
        cpu_owner: Option<usize>,
    ) -> CoreResult<Self> {
        if queues.len() != config.num_queues() {
            return Err(CoreError::InvalidState(format!(
                "expected {} queue(s), got {}",
                config.num_queues(),
                queues.len()
            )));
        }
        for (queue, &len) in queues.iter().enumerate() {
            if len > config.queue_capacity {
                return Err(CoreError::InvalidState(format!(
                    "queue {queue} holds {len} task(s), capacity is {}",
                    config.queue_capacity
                )));
            }
        }
        if tu_phase > config.tu_packets {
            return Err(CoreError::InvalidState(format!(
                "TU phase {tu_phase} out of [0, {}]",
                config.tu_packets
            )));
        }
        if cpu_phase < CPU_PHASE_ADMITTED || cpu_phase >= config.cpu_sections as i32 {
            return Err(CoreError::InvalidState(format!(
                "CPU phase {cpu_phase} out of [-1, {}]",
                config.cpu_sections as i32 - 1
            )));
        }
        if (tu_phase != 0) != tu_owner.is_some() {
            return Err(CoreError::InvalidState(
                "TU owner must be set exactly when the TU is active".to_string(),
            ));
        }
        if (cpu_phase != 0) != cpu_owner.is_some() {
            return Err(CoreError::InvalidState(
                "CPU owner must be set exactly when the CPU is active".to_string(),
            ));
        }
        for owner in [tu_owner, cpu_owner].into_iter().flatten() {
            if owner >= queues.len() {
                return Err(CoreError::InvalidState(format!(
                    "owner queue {owner} out of range"
                )));
            }
        }
        Ok(Self {
            queues,
            tu_phase,
            tu_owner,
            cpu_phase,
            cpu_owner,
        })
    }

    /// Número de filas
    pub fn num_queues(&self) -> usize {
        self.queues.len()
    }

    /// Tarefas enfileiradas na fila
    pub fn queue_len(&self, queue: usize) -> usize {
        self.queues[queue]
    }

    /// Total de tarefas enfileiradas (não conta as em serviço)
    pub fn total_tasks(&self) -> usize {
        self.queues.iter().sum()
    }

    /// Fase atual da TU
    pub fn tu_phase(&self) -> usize {
        self.tu_phase
    }

    /// Fase atual da CPU
    pub fn cpu_phase(&self) -> i32 {
        self.cpu_phase
    }

    /// Fila dona da transmissão em curso
    pub fn tu_owner(&self) -> Option<usize> {
        self.tu_owner
    }

    /// Fila dona do processamento em curso
    pub fn cpu_owner(&self) -> Option<usize> {
        self.cpu_owner
    }

    /// A TU está ociosa?
    pub fn is_tu_idle(&self) -> bool {
        self.tu_phase == 0
    }

    /// A CPU está ociosa?
    pub fn is_cpu_idle(&self) -> bool {
        self.cpu_phase == 0
    }

    /// A ação é legal neste estado?
    pub fn is_action_possible(&self, action: &Action) -> bool {
        match *action {
            Action::NoOp => true,
            Action::AddToCpu { queue } => {
                self.is_cpu_idle() && queue < self.num_queues() && self.queues[queue] >= 1
            }
            Action::AddToTu { queue } => {
                self.is_tu_idle() && queue < self.num_queues() && self.queues[queue] >= 1
            }
            Action::AddToBoth {
                cpu_queue,
                tu_queue,
            } => {
                if !self.is_cpu_idle() || !self.is_tu_idle() {
                    return false;
                }
                if cpu_queue >= self.num_queues() || tu_queue >= self.num_queues() {
                    return false;
                }
                if cpu_queue == tu_queue {
                    self.queues[cpu_queue] >= 2
                } else {
                    self.queues[cpu_queue] >= 1 && self.queues[tu_queue] >= 1
                }
            }
        }
    }

    /// Conjunto de ações legais, em ordem de aplicação
    pub fn possible_actions(&self) -> Vec<Action> {
        let n = self.num_queues();
        let mut actions = vec![Action::NoOp];
        for queue in 0..n {
            let action = Action::AddToCpu { queue };
            if self.is_action_possible(&action) {
                actions.push(action);
            }
        }
        for queue in 0..n {
            let action = Action::AddToTu { queue };
            if self.is_action_possible(&action) {
                actions.push(action);
            }
        }
        for cpu_queue in 0..n {
            for tu_queue in 0..n {
                let action = Action::AddToBoth {
                    cpu_queue,
                    tu_queue,
                };
                if self.is_action_possible(&action) {
                    actions.push(action);
                }
            }
        }
        actions
    }

    /// Aplica uma ação deterministicamente
    ///
    /// # Panics
    ///
    /// Aborta se a ação for ilegal no estado atual — erro de programação,
    /// nunca tratado pela lógica de política.
    pub fn apply_action(&self, config: &DeviceConfig, action: &Action) -> DeviceState {
        assert!(
            self.is_action_possible(action),
            "illegal action {action:?} for state {self:?}"
        );
        let mut next = self.clone();
        if let Some(queue) = action.cpu_queue() {
            next.queues[queue] -= 1;
            next.cpu_phase = CPU_PHASE_ADMITTED;
            next.cpu_owner = Some(queue);
        }
        if let Some(queue) = action.tu_queue() {
            next.queues[queue] -= 1;
            if config.tu_packets == 0 {
                // Transmissão sem pacotes conclui no próprio slot de despacho
                next.tu_phase = 0;
                next.tu_owner = None;
            } else {
                next.tu_phase = 1;
                next.tu_owner = Some(queue);
            }
        }
        next
    }

    /// Avança uma fase da CPU se houver tarefa ativa
    ///
    /// Devolve o estado seguinte e se a tarefa concluiu neste avanço.
    pub fn advance_cpu_if_active(&self, config: &DeviceConfig) -> (DeviceState, bool) {
        if self.is_cpu_idle() {
            return (self.clone(), false);
        }
        let mut next = self.clone();
        let last_phase = config.cpu_sections as i32 - 1;
        let completed = self.cpu_phase == last_phase
            || (self.cpu_phase == CPU_PHASE_ADMITTED && config.cpu_sections == 1);
        if completed {
            next.cpu_phase = 0;
            next.cpu_owner = None;
        } else if self.cpu_phase == CPU_PHASE_ADMITTED {
            next.cpu_phase = 1;
        } else {
            next.cpu_phase += 1;
        }
        (next, completed)
    }

    /// Avança uma fase da TU (uma partida bem-sucedida)
    ///
    /// Devolve o estado seguinte e se a transmissão concluiu.
    ///
    /// # Panics
    ///
    /// Aborta se a TU estiver ociosa.
    pub fn advance_tu(&self, config: &DeviceConfig) -> (DeviceState, bool) {
        assert!(!self.is_tu_idle(), "cannot advance an idle TU");
        let mut next = self.clone();
        if self.tu_phase == config.tu_packets {
            next.tu_phase = 0;
            next.tu_owner = None;
            (next, true)
        } else {
            next.tu_phase += 1;
            (next, false)
        }
    }

    /// Admite uma nova tarefa na fila
    ///
    /// Fila cheia é condição recuperável: a tarefa é descartada e contada
    /// pelo chamador, nunca perdida em silêncio.
    pub fn admit_task(&self, config: &DeviceConfig, queue: usize) -> CoreResult<DeviceState> {
        if self.queues[queue] >= config.queue_capacity {
            return Err(CoreError::QueueFull { queue });
        }
        let mut next = self.clone();
        next.queues[queue] += 1;
        Ok(next)
    }
}

//! Configuração do dispositivo
//!
//! Registro de valores validado que descreve a forma do dispositivo (filas,
//! unidade de transmissão, CPU) e os parâmetros estocásticos de um slot.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Configuração de um dispositivo de descarga de tarefas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Capacidade de cada fila de tarefas
    pub queue_capacity: usize,
    /// Número de pacotes por tarefa na unidade de transmissão (TU)
    pub tu_packets: usize,
    /// Número de seções de processamento da CPU (>= 1)
    pub cpu_sections: usize,
    /// Probabilidade de chegada por slot, uma por fila (alpha)
    pub arrival_rates: Vec<f64>,
    /// Probabilidade de partida de um pacote por slot (beta)
    pub departure_rate: f64,
    /// Peso de justiça local/nuvem (eta)
    pub eta: f64,
    /// Potência por slot do processamento local
    pub local_power: f64,
    /// Potência por slot do rádio
    pub tx_power: f64,
    /// Constante de ida e volta à nuvem, em slots (propagação + serialização)
    pub cloud_rtt: f64,
    /// Orçamento de potência média (pMax)
    pub power_cap: f64,
}

impl DeviceConfig {
    /// Cria configuração de fila única com potências padrão
    pub fn single_queue(
        queue_capacity: usize,
        tu_packets: usize,
        cpu_sections: usize,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            queue_capacity,
            tu_packets,
            cpu_sections,
            arrival_rates: vec![alpha],
            departure_rate: beta,
            eta: 0.5,
            local_power: 0.8,
            tx_power: 1.0,
            cloud_rtt: 10.0,
            power_cap: 200.0,
        }
    }

    /// Cria configuração multi-fila com potências padrão
    pub fn multi_queue(
        queue_capacity: usize,
        tu_packets: usize,
        cpu_sections: usize,
        arrival_rates: Vec<f64>,
        beta: f64,
    ) -> Self {
        Self {
            queue_capacity,
            tu_packets,
            cpu_sections,
            arrival_rates,
            departure_rate: beta,
            eta: 0.5,
            local_power: 0.8,
            tx_power: 1.0,
            cloud_rtt: 10.0,
            power_cap: 200.0,
        }
    }

    /// Número de filas independentes
    pub fn num_queues(&self) -> usize {
        self.arrival_rates.len()
    }

    /// Taxa de chegada agregada (soma dos alphas)
    pub fn total_arrival_rate(&self) -> f64 {
        self.arrival_rates.iter().sum()
    }

    /// Valida todos os campos da configuração
    pub fn validate(&self) -> CoreResult<()> {
        if self.cpu_sections < 1 {
            return Err(CoreError::InvalidConfig {
                field: "cpu_sections",
                reason: format!("must be >= 1, got {}", self.cpu_sections),
            });
        }
        if self.arrival_rates.is_empty() {
            return Err(CoreError::InvalidConfig {
                field: "arrival_rates",
                reason: "at least one queue is required".to_string(),
            });
        }
        for (queue, &alpha) in self.arrival_rates.iter().enumerate() {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(CoreError::InvalidConfig {
                    field: "arrival_rates",
                    reason: format!("alpha for queue {queue} must be in (0, 1], got {alpha}"),
                });
            }
        }
        if !(self.departure_rate > 0.0 && self.departure_rate <= 1.0) {
            return Err(CoreError::InvalidConfig {
                field: "departure_rate",
                reason: format!("beta must be in (0, 1], got {}", self.departure_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.eta) {
            return Err(CoreError::InvalidConfig {
                field: "eta",
                reason: format!("must be in [0, 1], got {}", self.eta),
            });
        }
        if self.local_power < 0.0 || !self.local_power.is_finite() {
            return Err(CoreError::InvalidConfig {
                field: "local_power",
                reason: format!("must be finite and >= 0, got {}", self.local_power),
            });
        }
        if self.tx_power < 0.0 || !self.tx_power.is_finite() {
            return Err(CoreError::InvalidConfig {
                field: "tx_power",
                reason: format!("must be finite and >= 0, got {}", self.tx_power),
            });
        }
        if self.cloud_rtt < 0.0 || !self.cloud_rtt.is_finite() {
            return Err(CoreError::InvalidConfig {
                field: "cloud_rtt",
                reason: format!("must be finite and >= 0, got {}", self.cloud_rtt),
            });
        }
        if !(self.power_cap > 0.0) {
            return Err(CoreError::InvalidConfig {
                field: "power_cap",
                reason: format!("must be > 0, got {}", self.power_cap),
            });
        }
        Ok(())
    }

    /// Estimativa de serviço local: slots após o slot de despacho
    pub fn local_service_estimate(&self) -> f64 {
        (self.cpu_sections - 1) as f64
    }

    /// Estimativa de serviço via nuvem: transmissão esperada + ida e volta
    pub fn cloud_service_estimate(&self) -> f64 {
        if self.tu_packets == 0 {
            self.cloud_rtt
        } else {
            self.tu_packets as f64 / self.departure_rate - 1.0 + self.cloud_rtt
        }
    }

    /// Tempo esperado de conclusão de uma tarefa despachada, ponderado por eta
    ///
    /// Eta é a fração de despachos locais imposta pela restrição de justiça,
    /// logo a mistura é eta * local + (1 - eta) * nuvem.
    pub fn expected_task_time(&self, eta: f64) -> f64 {
        eta * self.local_service_estimate() + (1.0 - eta) * self.cloud_service_estimate()
    }
}

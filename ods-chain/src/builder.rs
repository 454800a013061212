//! Construtor da cadeia de Markov de tempo discreto
//!
//! Para cada estado alcançável e cada ação legal: aplica a ação, avança uma
//! fase de CPU já ativa e ramifica sobre os processos de Bernoulli
//! independentes (chegada por fila, partida do rádio). Arestas para o mesmo
//! destino sob a mesma ação são fundidas concatenando as listas de símbolos.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ods_core::prelude::*;

use crate::error::ChainResult;

/// Aresta fundida: destino único por (ação, destino)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Ação que produziu a transição
    pub action: Action,
    /// Estado de destino
    pub dest: DeviceState,
    /// Rótulo: soma de produtos de símbolos
    pub products: Vec<SymbolProduct>,
}

/// Cadeia de Markov de um slot do dispositivo
#[derive(Debug, Clone)]
pub struct MarkovChain {
    config: DeviceConfig,
    states: Vec<DeviceState>,
    adjacency: HashMap<DeviceState, Vec<Edge>>,
}

impl MarkovChain {
    /// Enumera o espaço de estados e constrói todas as arestas fundidas
    pub fn build(config: &DeviceConfig) -> ChainResult<MarkovChain> {
        config.validate()?;
        let states = enumerate_states(config)?;
        let mut adjacency = HashMap::with_capacity(states.len());
        for state in &states {
            let edges = edges_for(config, state)?;
            adjacency.insert(state.clone(), edges);
        }
        Ok(MarkovChain {
            config: config.clone(),
            states,
            adjacency,
        })
    }

    /// Configuração usada na construção
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Estados na ordem canônica de enumeração
    pub fn states(&self) -> &[DeviceState] {
        &self.states
    }

    /// Número de estados
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Arestas fundidas saindo do estado
    ///
    /// # Panics
    ///
    /// Aborta para um estado que não pertence à cadeia.
    pub fn edges_from(&self, state: &DeviceState) -> &[Edge] {
        self.adjacency
            .get(state)
            .unwrap_or_else(|| panic!("state {state:?} is not part of the chain"))
    }
}

/// Enumeração canônica: comprimentos de fila (externo), fase da TU com dono,
/// fase da CPU com dono (interno)
fn enumerate_states(config: &DeviceConfig) -> ChainResult<Vec<DeviceState>> {
    let num_queues = config.num_queues();
    let tu_dim = tu_dimension(config);
    let cpu_dim = cpu_dimension(config);
    let mut states = Vec::new();
    let mut queues = vec![0usize; num_queues];
    loop {
        for &(tu_phase, tu_owner) in &tu_dim {
            for &(cpu_phase, cpu_owner) in &cpu_dim {
                states.push(DeviceState::new(
                    config,
                    queues.clone(),
                    tu_phase,
                    tu_owner,
                    cpu_phase,
                    cpu_owner,
                )?);
            }
        }
        // Odômetro sobre os comprimentos de fila, fila 0 mais significativa
        let mut position = num_queues;
        loop {
            if position == 0 {
                return Ok(states);
            }
            position -= 1;
            if queues[position] < config.queue_capacity {
                queues[position] += 1;
                break;
            }
            queues[position] = 0;
        }
    }
}

fn tu_dimension(config: &DeviceConfig) -> Vec<(usize, Option<usize>)> {
    let mut dim = vec![(0, None)];
    for phase in 1..=config.tu_packets {
        for owner in 0..config.num_queues() {
            dim.push((phase, Some(owner)));
        }
    }
    dim
}

fn cpu_dimension(config: &DeviceConfig) -> Vec<(i32, Option<usize>)> {
    let mut dim = vec![(0, None)];
    for phase in 1..config.cpu_sections as i32 {
        for owner in 0..config.num_queues() {
            dim.push((phase, Some(owner)));
        }
    }
    dim
}

/// Arestas fundidas de um estado, por ação legal
fn edges_for(config: &DeviceConfig, state: &DeviceState) -> ChainResult<Vec<Edge>> {
    let mut edges = Vec::new();
    for action in state.possible_actions() {
        let dispatched = state.apply_action(config, &action);
        let (advanced, _) = dispatched.advance_cpu_if_active(config);
        let tu_active = !advanced.is_tu_idle();

        let mut outcomes: Vec<(DeviceState, SymbolProduct)> = vec![(advanced, Vec::new())];

        // Ramo de chegada por fila; elidido por inteiro quando a fila está
        // cheia — o resultado da chegada não muda o destino
        for queue in 0..config.num_queues() {
            let mut split = Vec::with_capacity(outcomes.len() * 2);
            for (outcome, product) in outcomes {
                if outcome.queue_len(queue) >= config.queue_capacity {
                    split.push((outcome, product));
                    continue;
                }
                let admitted = outcome.admit_task(config, queue)?;
                let mut with = product.clone();
                with.push(Symbol::Arrival { queue });
                split.push((admitted, with));
                let mut without = product;
                without.push(Symbol::ArrivalComplement { queue });
                split.push((outcome, without));
            }
            outcomes = split;
        }

        // Ramo de partida do rádio
        if tu_active {
            let mut split = Vec::with_capacity(outcomes.len() * 2);
            for (outcome, product) in outcomes {
                let (departed, _) = outcome.advance_tu(config);
                let mut with = product.clone();
                with.push(Symbol::Departure);
                split.push((departed, with));
                let mut without = product;
                without.push(Symbol::DepartureComplement);
                split.push((outcome, without));
            }
            outcomes = split;
        }

        // Fusão por destino: um único Edge por (ação, destino)
        let mut merged: Vec<Edge> = Vec::new();
        for (dest, product) in outcomes {
            match merged.iter_mut().find(|edge| edge.dest == dest) {
                Some(edge) => edge.products.push(product),
                None => merged.push(Edge {
                    action,
                    dest,
                    products: vec![product],
                }),
            }
        }
        edges.extend(merged);
    }
    Ok(edges)
}

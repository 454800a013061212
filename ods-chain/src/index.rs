//! Bijeção (estado, ação) <-> coluna do LP
//!
//! Objeto único compartilhado entre quem escreve coeficientes e quem
//! decodifica a solução. A ordem é a da enumeração canônica da cadeia, com o
//! índice de ordem da ação como índice menor.

use std::collections::HashMap;

use ods_core::prelude::*;

use crate::builder::MarkovChain;

/// Mapeamento bijetivo entre pares (estado, ação) e colunas
#[derive(Debug, Clone)]
pub struct StateActionIndex {
    states: Vec<DeviceState>,
    positions: HashMap<DeviceState, usize>,
    num_queues: usize,
    action_count: usize,
}

impl StateActionIndex {
    /// Constrói o índice a partir da ordem de estados da cadeia
    pub fn new(chain: &MarkovChain) -> Self {
        let states: Vec<DeviceState> = chain.states().to_vec();
        let positions = states
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, state)| (state, position))
            .collect();
        let num_queues = chain.config().num_queues();
        Self {
            states,
            positions,
            num_queues,
            action_count: Action::count(num_queues),
        }
    }

    /// Número de estados
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Número de ações por estado (contagem fixa, ilegais incluídas)
    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Número total de colunas do LP
    pub fn num_columns(&self) -> usize {
        self.states.len() * self.action_count
    }

    /// Número de filas da configuração
    pub fn num_queues(&self) -> usize {
        self.num_queues
    }

    /// Índice canônico do estado
    ///
    /// # Panics
    ///
    /// Aborta para um estado fora do espaço enumerado.
    pub fn state_index(&self, state: &DeviceState) -> usize {
        *self
            .positions
            .get(state)
            .unwrap_or_else(|| panic!("state {state:?} is not indexed"))
    }

    /// Estado na posição canônica
    pub fn state_at(&self, index: usize) -> &DeviceState {
        &self.states[index]
    }

    /// Estados na ordem canônica
    pub fn states(&self) -> &[DeviceState] {
        &self.states
    }

    /// Coluna do par (estado, ação)
    pub fn column(&self, state: &DeviceState, action: &Action) -> usize {
        self.state_index(state) * self.action_count + action.order_index(self.num_queues)
    }

    /// Coluna a partir de índices crus
    pub fn column_of(&self, state_index: usize, action_order: usize) -> usize {
        debug_assert!(state_index < self.states.len());
        debug_assert!(action_order < self.action_count);
        state_index * self.action_count + action_order
    }

    /// Par (estado, ação) de uma coluna
    ///
    /// # Panics
    ///
    /// Aborta para uma coluna fora de `0..num_columns()` — descompasso de
    /// contagem de colunas é erro de programação.
    pub fn decode(&self, column: usize) -> (&DeviceState, Action) {
        assert!(
            column < self.num_columns(),
            "column {column} out of range for {} columns",
            self.num_columns()
        );
        let state = &self.states[column / self.action_count];
        let action = Action::from_order_index(column % self.action_count, self.num_queues);
        (state, action)
    }
}

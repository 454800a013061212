//! Símbolos de probabilidade
//!
//! Eventos de Bernoulli atômicos que rotulam as arestas da cadeia. Um rótulo
//! é uma soma de produtos: a lista externa é a disjunção de combinações de
//! resultados, cada lista interna a conjunção de eventos independentes.
//! Os rótulos são mantidos simbólicos porque a mesma cadeia é reutilizada ao
//! longo de uma varredura inteira de eta, só a substituição muda.

use serde::{Deserialize, Serialize};

use crate::config::DeviceConfig;

/// Evento de Bernoulli atômico
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Chegada de uma nova tarefa na fila (alpha)
    Arrival { queue: usize },
    /// Complemento da chegada (1 - alpha)
    ArrivalComplement { queue: usize },
    /// Partida de um pacote no rádio (beta)
    Departure,
    /// Complemento da partida (1 - beta)
    DepartureComplement,
}

/// Conjunção de eventos independentes
pub type SymbolProduct = Vec<Symbol>;

/// Substituição símbolo -> probabilidade concreta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolAssignment {
    arrival_rates: Vec<f64>,
    departure_rate: f64,
}

impl SymbolAssignment {
    /// Extrai as probabilidades concretas de uma configuração
    pub fn from_config(config: &DeviceConfig) -> Self {
        Self {
            arrival_rates: config.arrival_rates.clone(),
            departure_rate: config.departure_rate,
        }
    }

    /// Probabilidade concreta de um símbolo
    pub fn probability(&self, symbol: &Symbol) -> f64 {
        match *symbol {
            Symbol::Arrival { queue } => self.arrival_rates[queue],
            Symbol::ArrivalComplement { queue } => 1.0 - self.arrival_rates[queue],
            Symbol::Departure => self.departure_rate,
            Symbol::DepartureComplement => 1.0 - self.departure_rate,
        }
    }

    /// Produto das probabilidades de uma conjunção
    pub fn product(&self, product: &SymbolProduct) -> f64 {
        product.iter().map(|s| self.probability(s)).product()
    }

    /// Soma de produtos de uma disjunção
    pub fn sum_of_products(&self, products: &[SymbolProduct]) -> f64 {
        products.iter().map(|p| self.product(p)).sum()
    }
}

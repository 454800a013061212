//! Frações de transição independentes
//!
//! Consulta estrutural sobre a cadeia: para (origem, destino, ação), o
//! denominador é o espaço completo de resultados da decisão (todas as listas
//! de símbolos saindo da origem sob a ação) e o numerador o subconjunto que
//! alcança o destino. Independente dos valores concretos de alpha/beta: a
//! tabela é construída uma vez por forma (filas, TU, CPU) e reutilizada ao
//! longo de varreduras inteiras de eta/alpha, variando só a substituição.

use std::collections::HashMap;

use ods_core::prelude::*;

use crate::builder::MarkovChain;
use crate::index::StateActionIndex;

/// Fração simbólica numerador/denominador de uma transição
#[derive(Debug, Clone, Copy)]
pub struct TransitionFraction<'a> {
    numerator: Option<&'a [SymbolProduct]>,
    denominator: Option<&'a [SymbolProduct]>,
}

impl<'a> TransitionFraction<'a> {
    /// Fração vazia: transição inexistente
    pub fn empty() -> Self {
        Self {
            numerator: None,
            denominator: None,
        }
    }

    /// A transição não existe?
    pub fn is_empty(&self) -> bool {
        self.numerator.is_none()
    }

    /// Listas de símbolos que alcançam o destino
    pub fn numerator(&self) -> &'a [SymbolProduct] {
        self.numerator.unwrap_or(&[])
    }

    /// Espaço completo de resultados da decisão
    pub fn denominator(&self) -> &'a [SymbolProduct] {
        self.denominator.unwrap_or(&[])
    }

    /// Substitui símbolos por probabilidades e avalia a fração
    ///
    /// Soma de produtos do numerador sobre soma de produtos do denominador;
    /// 0.0 para a fração vazia.
    pub fn resolve(&self, assignment: &SymbolAssignment) -> f64 {
        match (self.numerator, self.denominator) {
            (Some(numerator), Some(denominator)) => {
                let total = assignment.sum_of_products(denominator);
                if total == 0.0 {
                    0.0
                } else {
                    assignment.sum_of_products(numerator) / total
                }
            }
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
struct DecisionOutcomes {
    denominator: Vec<SymbolProduct>,
    numerators: HashMap<usize, Vec<SymbolProduct>>,
}

/// Tabela de frações por (origem, ação), indexada pela ordem canônica
#[derive(Debug, Clone)]
pub struct TransitionTable {
    entries: HashMap<(usize, usize), DecisionOutcomes>,
    num_queues: usize,
}

impl TransitionTable {
    /// Constrói a tabela completa a partir das arestas fundidas
    pub fn new(chain: &MarkovChain, index: &StateActionIndex) -> Self {
        let num_queues = chain.config().num_queues();
        let mut entries: HashMap<(usize, usize), DecisionOutcomes> = HashMap::new();
        for (source, state) in index.states().iter().enumerate() {
            for edge in chain.edges_from(state) {
                let key = (source, edge.action.order_index(num_queues));
                let entry = entries.entry(key).or_insert_with(|| DecisionOutcomes {
                    denominator: Vec::new(),
                    numerators: HashMap::new(),
                });
                entry.denominator.extend(edge.products.iter().cloned());
                let dest = index.state_index(&edge.dest);
                entry
                    .numerators
                    .entry(dest)
                    .or_default()
                    .extend(edge.products.iter().cloned());
            }
        }
        Self {
            entries,
            num_queues,
        }
    }

    /// Fração simbólica de (origem, destino, ação); vazia se não existe
    pub fn fraction(&self, source: usize, dest: usize, action: &Action) -> TransitionFraction<'_> {
        let key = (source, action.order_index(self.num_queues));
        match self.entries.get(&key) {
            Some(entry) => TransitionFraction {
                numerator: entry.numerators.get(&dest).map(Vec::as_slice),
                denominator: Some(&entry.denominator),
            },
            None => TransitionFraction::empty(),
        }
    }

    /// Probabilidade concreta de (origem, destino, ação) sob a substituição
    pub fn resolve(
        &self,
        source: usize,
        dest: usize,
        action: &Action,
        assignment: &SymbolAssignment,
    ) -> f64 {
        self.fraction(source, dest, action).resolve(assignment)
    }

    /// Linha esparsa resolvida: destinos alcançáveis e suas probabilidades
    pub fn resolved_outgoing(
        &self,
        source: usize,
        action: &Action,
        assignment: &SymbolAssignment,
    ) -> Vec<(usize, f64)> {
        let key = (source, action.order_index(self.num_queues));
        match self.entries.get(&key) {
            Some(entry) => {
                let total = assignment.sum_of_products(&entry.denominator);
                if total == 0.0 {
                    return Vec::new();
                }
                entry
                    .numerators
                    .iter()
                    .map(|(&dest, products)| (dest, assignment.sum_of_products(products) / total))
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// A decisão (origem, ação) existe na cadeia?
    pub fn has_decision(&self, source: usize, action: &Action) -> bool {
        self.entries
            .contains_key(&(source, action.order_index(self.num_queues)))
    }
}

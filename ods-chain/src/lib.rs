//! # ODS-Chain — Cadeia de Markov do Dispositivo
//!
//! Modela um slot de tempo do dispositivo como uma cadeia de Markov de tempo
//! discreto: estados enumerados em ordem canônica, arestas rotuladas por
//! expressões simbólicas de probabilidade (soma de produtos de eventos de
//! Bernoulli) e fundidas por (ação, destino).
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          MarkovChain                            │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Estados (ordem canônica)                 │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Arestas fundidas + rótulos simbólicos    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  StateActionIndex (bijeção de colunas)    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  TransitionTable (frações num/den)        │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Os rótulos permanecem simbólicos de propósito: a mesma cadeia e a mesma
//! tabela de frações servem a todos os valores de eta de uma varredura, só a
//! substituição símbolo -> probabilidade muda.
//!
//! ## Exemplo
//!
//! ```ignore
//! use ods_core::prelude::*;
//! use ods_chain::{MarkovChain, StateActionIndex, TransitionTable};
//!
//! let config = DeviceConfig::single_queue(5, 4, 3, 0.3, 0.4);
//! let chain = MarkovChain::build(&config)?;
//! let index = StateActionIndex::new(&chain);
//! let table = TransitionTable::new(&chain, &index);
//! ```

pub mod builder;
pub mod error;
pub mod fraction;
pub mod index;

pub use builder::{Edge, MarkovChain};
pub use error::{ChainError, ChainResult};
pub use fraction::{TransitionFraction, TransitionTable};
pub use index::StateActionIndex;

#[cfg(test)]
mod tests;

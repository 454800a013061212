//! Testes integrados para ods-chain

use std::collections::{HashMap, HashSet};

use ods_core::prelude::*;

use crate::builder::MarkovChain;
use crate::fraction::TransitionTable;
use crate::index::StateActionIndex;

fn config() -> DeviceConfig {
    DeviceConfig::single_queue(5, 4, 3, 0.3, 0.4)
}

fn multi_config() -> DeviceConfig {
    DeviceConfig::multi_queue(2, 1, 2, vec![0.2, 0.3], 0.5)
}

fn single_state(cfg: &DeviceConfig, queue: usize, tu: usize, cpu: i32) -> DeviceState {
    let tu_owner = (tu != 0).then_some(0);
    let cpu_owner = (cpu != 0).then_some(0);
    DeviceState::new(cfg, vec![queue], tu, tu_owner, cpu, cpu_owner).unwrap()
}

#[test]
fn test_state_space_size() {
    let chain = MarkovChain::build(&config()).unwrap();
    // filas 0..=5, TU 0..=4, CPU 0..=2
    assert_eq!(chain.num_states(), 6 * 5 * 3);

    let multi = MarkovChain::build(&multi_config()).unwrap();
    // filas 3x3, TU {ociosa} + 1 fase x 2 donas, CPU idem
    assert_eq!(multi.num_states(), 9 * 3 * 3);
}

#[test]
fn test_example_fanout_of_state_1_0_0() {
    let cfg = config();
    let chain = MarkovChain::build(&cfg).unwrap();
    let source = single_state(&cfg, 1, 0, 0);
    let edges = chain.edges_from(&source);

    let destinations: HashSet<DeviceState> = edges.iter().map(|e| e.dest.clone()).collect();
    let expected: HashSet<DeviceState> = [
        (0, 1, 0),
        (0, 0, 1),
        (0, 2, 0),
        (1, 0, 0),
        (1, 1, 0),
        (1, 0, 1),
        (1, 2, 0),
        (2, 0, 0),
    ]
    .into_iter()
    .map(|(q, tu, cpu)| single_state(&cfg, q, tu, cpu))
    .collect();
    assert_eq!(destinations, expected);

    // A aresta de permanência carrega exatamente {NoOp, ArrivalComplement}
    let stay = single_state(&cfg, 1, 0, 0);
    let self_edges: Vec<_> = edges.iter().filter(|e| e.dest == stay).collect();
    assert_eq!(self_edges.len(), 1);
    assert_eq!(self_edges[0].action, Action::NoOp);
    assert_eq!(
        self_edges[0].products,
        vec![vec![Symbol::ArrivalComplement { queue: 0 }]]
    );
}

#[test]
fn test_labels_sum_to_one_per_action() {
    for cfg in [config(), multi_config()] {
        let chain = MarkovChain::build(&cfg).unwrap();
        let assignment = SymbolAssignment::from_config(&cfg);
        for state in chain.states() {
            let mut per_action: HashMap<Action, f64> = HashMap::new();
            for edge in chain.edges_from(state) {
                *per_action.entry(edge.action).or_insert(0.0) +=
                    assignment.sum_of_products(&edge.products);
            }
            for action in state.possible_actions() {
                let total = per_action[&action];
                assert!(
                    (total - 1.0).abs() < 1e-9,
                    "labels of {state:?} under {action:?} sum to {total}"
                );
            }
        }
    }
}

#[test]
fn test_merge_is_idempotent() {
    // Nenhum par (ação, destino) aparece em mais de uma aresta fundida
    for cfg in [config(), multi_config()] {
        let chain = MarkovChain::build(&cfg).unwrap();
        for state in chain.states() {
            let mut seen = HashSet::new();
            for edge in chain.edges_from(state) {
                assert!(
                    seen.insert((edge.action, edge.dest.clone())),
                    "duplicate merged edge from {state:?} to {:?}",
                    edge.dest
                );
            }
        }
    }
}

#[test]
fn test_arrival_branch_elided_at_capacity() {
    let cfg = config();
    let chain = MarkovChain::build(&cfg).unwrap();
    let full = single_state(&cfg, 5, 0, 0);
    for edge in chain.edges_from(&full) {
        if edge.action == Action::NoOp {
            // Fila cheia: sem divisão Alpha/AlphaComplement
            assert_eq!(edge.products, vec![Vec::<Symbol>::new()]);
        }
        for product in &edge.products {
            assert!(
                !product
                    .iter()
                    .any(|s| matches!(s, Symbol::Arrival { .. } | Symbol::ArrivalComplement { .. }))
                    || edge.action.is_dispatch(),
                "full queue must not branch on arrivals under NoOp"
            );
        }
    }
}

#[test]
fn test_column_round_trip_full_space() {
    for cfg in [config(), multi_config()] {
        let chain = MarkovChain::build(&cfg).unwrap();
        let index = StateActionIndex::new(&chain);
        let num_queues = cfg.num_queues();
        let mut seen = HashSet::new();
        for state in chain.states() {
            for order in 0..Action::count(num_queues) {
                let action = Action::from_order_index(order, num_queues);
                let column = index.column(state, &action);
                assert!(seen.insert(column), "column {column} assigned twice");
                let (decoded_state, decoded_action) = index.decode(column);
                assert_eq!(decoded_state, state);
                assert_eq!(decoded_action, action);
            }
        }
        assert_eq!(seen.len(), index.num_columns());
    }
}

#[test]
fn test_fraction_known_value() {
    let cfg = config();
    let chain = MarkovChain::build(&cfg).unwrap();
    let index = StateActionIndex::new(&chain);
    let table = TransitionTable::new(&chain, &index);
    let assignment = SymbolAssignment::from_config(&cfg);

    let source = index.state_index(&single_state(&cfg, 1, 0, 0));
    let action = Action::AddToTu { queue: 0 };

    // (1,0,0) --AddToTu--> (0,2,0) exige AlphaComplement e Departure
    let dest = index.state_index(&single_state(&cfg, 0, 2, 0));
    let fraction = table.fraction(source, dest, &action);
    assert!(!fraction.is_empty());
    assert_eq!(fraction.numerator().len(), 1);
    assert_eq!(fraction.denominator().len(), 4);
    assert!((fraction.resolve(&assignment) - 0.7 * 0.4).abs() < 1e-12);

    // Transição inexistente: fração vazia resolve para 0
    let unreachable = index.state_index(&single_state(&cfg, 5, 4, 2));
    let empty = table.fraction(source, unreachable, &action);
    assert!(empty.is_empty());
    assert_eq!(empty.resolve(&assignment), 0.0);
}

#[test]
fn test_resolved_rows_sum_to_one() {
    let cfg = multi_config();
    let chain = MarkovChain::build(&cfg).unwrap();
    let index = StateActionIndex::new(&chain);
    let table = TransitionTable::new(&chain, &index);
    let assignment = SymbolAssignment::from_config(&cfg);

    for (source, state) in index.states().iter().enumerate() {
        for action in state.possible_actions() {
            let row = table.resolved_outgoing(source, &action, &assignment);
            let total: f64 = row.iter().map(|(_, p)| p).sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "outgoing probabilities of {state:?} under {action:?} sum to {total}"
            );
        }
    }
}

#[test]
fn test_table_reused_across_substitutions() {
    // A mesma tabela estrutural serve a substituições diferentes
    let cfg = config();
    let chain = MarkovChain::build(&cfg).unwrap();
    let index = StateActionIndex::new(&chain);
    let table = TransitionTable::new(&chain, &index);

    let source = index.state_index(&single_state(&cfg, 1, 0, 0));
    let dest = index.state_index(&single_state(&cfg, 2, 0, 0));
    let action = Action::NoOp;

    let original = SymbolAssignment::from_config(&cfg);
    let mut other_cfg = cfg.clone();
    other_cfg.arrival_rates = vec![0.9];
    let other = SymbolAssignment::from_config(&other_cfg);

    assert!((table.resolve(source, dest, &action, &original) - 0.3).abs() < 1e-12);
    assert!((table.resolve(source, dest, &action, &other) - 0.9).abs() < 1e-12);
}

#[test]
fn test_illegal_decision_has_no_entry() {
    let cfg = config();
    let chain = MarkovChain::build(&cfg).unwrap();
    let index = StateActionIndex::new(&chain);
    let table = TransitionTable::new(&chain, &index);

    let empty = index.state_index(&DeviceState::empty(1));
    assert!(table.has_decision(empty, &Action::NoOp));
    assert!(!table.has_decision(empty, &Action::AddToCpu { queue: 0 }));
}

//! Testes integrados para ods-core

use crate::prelude::*;

fn config() -> DeviceConfig {
    DeviceConfig::single_queue(5, 4, 3, 0.3, 0.4)
}

#[test]
fn test_config_validation() {
    assert!(config().validate().is_ok());

    let mut bad = config();
    bad.cpu_sections = 0;
    assert!(matches!(
        bad.validate(),
        Err(CoreError::InvalidConfig {
            field: "cpu_sections",
            ..
        })
    ));

    let mut bad = config();
    bad.arrival_rates = vec![0.0];
    assert!(bad.validate().is_err());

    let mut bad = config();
    bad.arrival_rates = vec![];
    assert!(bad.validate().is_err());

    let mut bad = config();
    bad.departure_rate = 1.5;
    assert!(bad.validate().is_err());

    let mut bad = config();
    bad.eta = -0.1;
    assert!(bad.validate().is_err());

    let mut bad = config();
    bad.power_cap = 0.0;
    assert!(bad.validate().is_err());
}

#[test]
fn test_expected_task_time_blend() {
    let cfg = config();
    // Local: cpuSections - 1 slots após o despacho
    assert_eq!(cfg.expected_task_time(1.0), 2.0);
    // Nuvem: tuPackets / beta - 1 + rtt
    let cloud = 4.0 / 0.4 - 1.0 + 10.0;
    assert!((cfg.expected_task_time(0.0) - cloud).abs() < 1e-12);
    let mid = 0.5 * 2.0 + 0.5 * cloud;
    assert!((cfg.expected_task_time(0.5) - mid).abs() < 1e-12);
}

#[test]
fn test_expected_task_time_zero_packets() {
    let mut cfg = config();
    cfg.tu_packets = 0;
    assert_eq!(cfg.cloud_service_estimate(), cfg.cloud_rtt);
}

#[test]
fn test_state_construction_bounds() {
    let cfg = config();
    assert!(DeviceState::new(&cfg, vec![5], 0, None, 0, None).is_ok());
    assert!(DeviceState::new(&cfg, vec![6], 0, None, 0, None).is_err());
    assert!(DeviceState::new(&cfg, vec![0], 5, Some(0), 0, None).is_err());
    assert!(DeviceState::new(&cfg, vec![0], 0, None, 3, Some(0)).is_err());
    // Dono deve existir exatamente quando o recurso está ativo
    assert!(DeviceState::new(&cfg, vec![0], 1, None, 0, None).is_err());
    assert!(DeviceState::new(&cfg, vec![0], 0, Some(0), 0, None).is_err());
    assert!(DeviceState::new(&cfg, vec![0], 1, Some(0), 2, Some(0)).is_ok());
}

#[test]
fn test_structural_equality_and_hash() {
    use std::collections::HashSet;

    let cfg = config();
    let a = DeviceState::new(&cfg, vec![1], 2, Some(0), 0, None).unwrap();
    let b = DeviceState::new(&cfg, vec![1], 2, Some(0), 0, None).unwrap();
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn test_possible_actions_single_queue() {
    let cfg = config();

    let empty = DeviceState::empty(1);
    assert_eq!(empty.possible_actions(), vec![Action::NoOp]);

    let one = DeviceState::new(&cfg, vec![1], 0, None, 0, None).unwrap();
    assert_eq!(
        one.possible_actions(),
        vec![
            Action::NoOp,
            Action::AddToCpu { queue: 0 },
            Action::AddToTu { queue: 0 },
        ]
    );

    let two = DeviceState::new(&cfg, vec![2], 0, None, 0, None).unwrap();
    assert!(two.is_action_possible(&Action::AddToBoth {
        cpu_queue: 0,
        tu_queue: 0
    }));

    // Recursos ocupados bloqueiam o despacho correspondente
    let busy_cpu = DeviceState::new(&cfg, vec![2], 0, None, 1, Some(0)).unwrap();
    assert!(!busy_cpu.is_action_possible(&Action::AddToCpu { queue: 0 }));
    assert!(busy_cpu.is_action_possible(&Action::AddToTu { queue: 0 }));

    let busy_tu = DeviceState::new(&cfg, vec![2], 3, Some(0), 0, None).unwrap();
    assert!(!busy_tu.is_action_possible(&Action::AddToTu { queue: 0 }));
    assert!(busy_tu.is_action_possible(&Action::AddToCpu { queue: 0 }));
}

#[test]
fn test_possible_actions_multi_queue() {
    let cfg = DeviceConfig::multi_queue(3, 2, 2, vec![0.2, 0.3], 0.5);

    // Uma tarefa em cada fila: AddToBoth só entre filas distintas
    let state = DeviceState::new(&cfg, vec![1, 1], 0, None, 0, None).unwrap();
    assert!(!state.is_action_possible(&Action::AddToBoth {
        cpu_queue: 0,
        tu_queue: 0
    }));
    assert!(state.is_action_possible(&Action::AddToBoth {
        cpu_queue: 0,
        tu_queue: 1
    }));
    assert!(state.is_action_possible(&Action::AddToBoth {
        cpu_queue: 1,
        tu_queue: 0
    }));
}

#[test]
fn test_apply_action_add_to_cpu() {
    let cfg = config();
    let state = DeviceState::new(&cfg, vec![2], 0, None, 0, None).unwrap();
    let next = state.apply_action(&cfg, &Action::AddToCpu { queue: 0 });
    assert_eq!(next.queue_len(0), 1);
    assert_eq!(next.cpu_phase(), CPU_PHASE_ADMITTED);
    assert_eq!(next.cpu_owner(), Some(0));
}

#[test]
fn test_apply_action_add_to_both() {
    let cfg = config();
    let state = DeviceState::new(&cfg, vec![2], 0, None, 0, None).unwrap();
    let next = state.apply_action(
        &cfg,
        &Action::AddToBoth {
            cpu_queue: 0,
            tu_queue: 0,
        },
    );
    assert_eq!(next.queue_len(0), 0);
    assert_eq!(next.cpu_phase(), CPU_PHASE_ADMITTED);
    assert_eq!(next.tu_phase(), 1);
    assert_eq!(next.tu_owner(), Some(0));
}

#[test]
#[should_panic(expected = "illegal action")]
fn test_apply_action_illegal_panics() {
    let cfg = config();
    let empty = DeviceState::empty(1);
    let _ = empty.apply_action(&cfg, &Action::AddToCpu { queue: 0 });
}

#[test]
fn test_cpu_advance_cycle() {
    let cfg = config();
    let state = DeviceState::new(&cfg, vec![1], 0, None, 0, None).unwrap();
    let admitted = state.apply_action(&cfg, &Action::AddToCpu { queue: 0 });

    let (s1, done) = admitted.advance_cpu_if_active(&cfg);
    assert!(!done);
    assert_eq!(s1.cpu_phase(), 1);

    let (s2, done) = s1.advance_cpu_if_active(&cfg);
    assert!(!done);
    assert_eq!(s2.cpu_phase(), 2);

    // cpuSections = 3: avançar da última seção conclui
    let (s3, done) = s2.advance_cpu_if_active(&cfg);
    assert!(done);
    assert!(s3.is_cpu_idle());
    assert_eq!(s3.cpu_owner(), None);
}

#[test]
fn test_cpu_single_section_completes_on_admission_advance() {
    let cfg = DeviceConfig::single_queue(2, 1, 1, 0.3, 0.4);
    let state = DeviceState::new(&cfg, vec![1], 0, None, 0, None).unwrap();
    let admitted = state.apply_action(&cfg, &Action::AddToCpu { queue: 0 });
    let (next, done) = admitted.advance_cpu_if_active(&cfg);
    assert!(done);
    assert!(next.is_cpu_idle());
}

#[test]
fn test_cpu_advance_idle_is_noop() {
    let cfg = config();
    let idle = DeviceState::empty(1);
    let (next, done) = idle.advance_cpu_if_active(&cfg);
    assert!(!done);
    assert_eq!(next, idle);
}

#[test]
fn test_tu_advance_cycle() {
    let cfg = DeviceConfig::single_queue(2, 2, 2, 0.3, 0.4);
    let state = DeviceState::new(&cfg, vec![1], 0, None, 0, None).unwrap();
    let sent = state.apply_action(&cfg, &Action::AddToTu { queue: 0 });
    assert_eq!(sent.tu_phase(), 1);

    let (s1, done) = sent.advance_tu(&cfg);
    assert!(!done);
    assert_eq!(s1.tu_phase(), 2);

    let (s2, done) = s1.advance_tu(&cfg);
    assert!(done);
    assert!(s2.is_tu_idle());
    assert_eq!(s2.tu_owner(), None);
}

#[test]
fn test_tu_zero_packets_completes_on_dispatch() {
    let cfg = DeviceConfig::single_queue(2, 0, 2, 0.3, 0.4);
    let state = DeviceState::new(&cfg, vec![1], 0, None, 0, None).unwrap();
    let sent = state.apply_action(&cfg, &Action::AddToTu { queue: 0 });
    assert!(sent.is_tu_idle());
    assert_eq!(sent.queue_len(0), 0);
}

#[test]
fn test_admit_task_and_overflow() {
    let cfg = DeviceConfig::single_queue(1, 1, 2, 0.3, 0.4);
    let empty = DeviceState::empty(1);
    let one = empty.admit_task(&cfg, 0).unwrap();
    assert_eq!(one.queue_len(0), 1);
    assert!(matches!(
        one.admit_task(&cfg, 0),
        Err(CoreError::QueueFull { queue: 0 })
    ));
}

#[test]
fn test_action_order_index_round_trip() {
    for num_queues in 1..=3 {
        for index in 0..Action::count(num_queues) {
            let action = Action::from_order_index(index, num_queues);
            assert_eq!(action.order_index(num_queues), index);
        }
    }
}

#[test]
fn test_action_order_index_layout() {
    // NoOp, depois CPU por fila, depois TU por fila, depois pares (c, t)
    assert_eq!(Action::NoOp.order_index(2), 0);
    assert_eq!(Action::AddToCpu { queue: 1 }.order_index(2), 2);
    assert_eq!(Action::AddToTu { queue: 0 }.order_index(2), 3);
    assert_eq!(
        Action::AddToBoth {
            cpu_queue: 1,
            tu_queue: 0
        }
        .order_index(2),
        7
    );
    assert_eq!(Action::count(2), 9);
}

#[test]
fn test_symbol_assignment_resolution() {
    let cfg = config();
    let assign = SymbolAssignment::from_config(&cfg);
    assert!((assign.probability(&Symbol::Arrival { queue: 0 }) - 0.3).abs() < 1e-12);
    assert!((assign.probability(&Symbol::ArrivalComplement { queue: 0 }) - 0.7).abs() < 1e-12);
    assert!((assign.probability(&Symbol::Departure) - 0.4).abs() < 1e-12);

    let product = vec![Symbol::Arrival { queue: 0 }, Symbol::Departure];
    assert!((assign.product(&product) - 0.12).abs() < 1e-12);

    // Disjunção completa soma 1
    let products = vec![
        vec![Symbol::Arrival { queue: 0 }, Symbol::Departure],
        vec![Symbol::Arrival { queue: 0 }, Symbol::DepartureComplement],
        vec![Symbol::ArrivalComplement { queue: 0 }, Symbol::Departure],
        vec![
            Symbol::ArrivalComplement { queue: 0 },
            Symbol::DepartureComplement,
        ],
    ];
    assert!((assign.sum_of_products(&products) - 1.0).abs() < 1e-12);
}

#[test]
fn test_config_serde_round_trip() {
    let cfg = config();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: DeviceConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, back);
}

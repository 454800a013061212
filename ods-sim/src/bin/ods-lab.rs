//! Laboratório de experimentos de descarga
//!
//! Sintetiza a política estocástica pela varredura de eta e a compara, por
//! simulação, com as quatro políticas de referência.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ods_core::DeviceConfig;
use ods_lp::{MinilpSolver, RangedPolicyFinder};
use ods_sim::{
    run_batch, PolicyKind, SimResult, SimulationJob, Simulator, StochasticOffloadPolicy,
};

#[derive(Parser)]
#[command(name = "ods-lab")]
#[command(version = "2026.8.1")]
#[command(about = "Offloading policy synthesis and simulation lab", long_about = None)]
struct Args {
    /// Capacidade de cada fila
    #[arg(long, default_value_t = 4, env = "ODS_QUEUE_CAPACITY")]
    queue_capacity: usize,

    /// Pacotes por tarefa na transmissão
    #[arg(long, default_value_t = 2, env = "ODS_TU_PACKETS")]
    tu_packets: usize,

    /// Seções de processamento da CPU
    #[arg(long, default_value_t = 3, env = "ODS_CPU_SECTIONS")]
    cpu_sections: usize,

    /// Probabilidade de chegada por fila (repetir para mais filas)
    #[arg(long = "alpha", default_values_t = vec![0.3])]
    arrival_rates: Vec<f64>,

    /// Probabilidade de partida de um pacote
    #[arg(long, default_value_t = 0.6)]
    beta: f64,

    /// Orçamento de potência média
    #[arg(long, default_value_t = 200.0)]
    power_cap: f64,

    /// Horizonte de simulação em slots
    #[arg(long, default_value_t = 200_000)]
    slots: u64,

    /// Semente dos geradores
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Amostras da varredura de eta
    #[arg(long, default_value_t = 21)]
    eta_samples: usize,

    /// Threads do lote de referência
    #[arg(long, default_value_t = 4)]
    workers: usize,
}

fn run(args: &Args) -> SimResult<()> {
    let mut config = DeviceConfig::multi_queue(
        args.queue_capacity,
        args.tu_packets,
        args.cpu_sections,
        args.arrival_rates.clone(),
        args.beta,
    );
    config.power_cap = args.power_cap;
    config.validate()?;
    tracing::info!(
        queues = config.num_queues(),
        capacity = config.queue_capacity,
        tu_packets = config.tu_packets,
        cpu_sections = config.cpu_sections,
        beta = config.departure_rate,
        power_cap = config.power_cap,
        "configuration"
    );

    let solver = MinilpSolver::new();
    let finder = RangedPolicyFinder::new(&config, &solver)?;
    let outcome = finder.find(args.eta_samples)?;
    tracing::info!(
        eta = outcome.eta,
        predicted_delay = outcome.predicted_delay,
        states = finder.index().num_states(),
        "synthesized policy"
    );

    let simulator = Simulator::new(config.clone(), args.slots, args.seed)?;
    let mut synthesized = StochasticOffloadPolicy::new(outcome.policy, args.seed);
    let report = simulator.run(&mut synthesized)?;
    tracing::info!(
        policy = "lp-stochastic",
        delay = report.average_delay,
        power = report.average_power,
        completed = report.completed,
        dropped = report.dropped,
        in_flight = report.in_flight,
        "simulated"
    );

    let baselines = [
        PolicyKind::LocalOnly,
        PolicyKind::OffloadOnly,
        PolicyKind::GreedyLocalFirst,
        PolicyKind::GreedyOffloadFirst,
    ];
    let jobs: Vec<SimulationJob> = baselines
        .iter()
        .map(|kind| SimulationJob {
            config: config.clone(),
            policy: kind.clone(),
            slots: args.slots,
            seed: args.seed,
        })
        .collect();
    for (kind, report) in baselines.iter().zip(run_batch(&jobs, args.workers)?) {
        tracing::info!(
            policy = kind.name(),
            delay = report.average_delay,
            power = report.average_power,
            completed = report.completed,
            dropped = report.dropped,
            in_flight = report.in_flight,
            "simulated"
        );
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ods_lab=info,ods_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    if let Err(error) = run(&args) {
        tracing::error!(%error, "experiment failed");
        std::process::exit(1);
    }
}

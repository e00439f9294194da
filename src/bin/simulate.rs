//! Simulation Binary
//!
//! Plays a batch of seeded games with one strategy and prints the
//! aggregate statistics.
//!
//! Options: --games, --seed, --strategy, --max-nodes, --fallback-first-turn, --json, -v

use clap::{Parser, ValueEnum};
use the_game::search::{BacktrackSolver, Fallback, SolverConfig};
use the_game::simulation::{ReportLevel, SimulationConfig, Simulator};
use the_game::strategies::{Greedy, GreedyTracksTens, JumpFirst, RandomPlay, Strategy};

const DEFAULT_MAX_NODES: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyKind {
    Greedy,
    Tens,
    Jumps,
    Random,
    Solver,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate games of The Game", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Base seed; game i is dealt from seed + i
    #[arg(short, long)]
    seed: Option<u64>,

    /// Strategy to evaluate
    #[arg(long, value_enum, default_value_t = StrategyKind::Greedy)]
    strategy: StrategyKind,

    /// Turns the solver may enumerate per solve; 0 removes the limit.
    /// A fresh deal has tens of millions of turns, so an unlimited solve
    /// can take gigabytes of memory.
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    max_nodes: u64,

    /// Let the solver play its first valid turn in lost positions
    #[arg(long)]
    fallback_first_turn: bool,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,

    /// More output: -v per game, -vv per turn
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn report(&self) -> ReportLevel {
        match self.verbose {
            0 => ReportLevel::Aggregate,
            1 => ReportLevel::WinLoss,
            _ => ReportLevel::EachTurn,
        }
    }

    fn strategy(&self) -> Box<dyn Strategy> {
        match self.strategy {
            StrategyKind::Greedy => Box::new(Greedy),
            StrategyKind::Tens => Box::new(GreedyTracksTens),
            StrategyKind::Jumps => Box::new(JumpFirst),
            StrategyKind::Random => Box::new(match self.seed {
                Some(seed) => RandomPlay::new(seed),
                None => RandomPlay::from_entropy(),
            }),
            StrategyKind::Solver => Box::new(BacktrackSolver::new(self.solver_config())),
        }
    }

    fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::new();
        if self.max_nodes > 0 {
            config = config.with_max_nodes(self.max_nodes);
        }
        if self.fallback_first_turn {
            config = config.with_fallback(Fallback::FirstTurn);
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let report = args.report();

    env_logger::Builder::new()
        .filter_level(report.level_filter())
        .parse_default_env()
        .format_target(false)
        .init();

    let mut config = SimulationConfig::new()
        .with_num_games(args.games)
        .with_report(report);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut strategy = args.strategy();
    log::info!("evaluating strategy {} over {} games", strategy.name(), args.games);

    let stats = Simulator::new(config).run(&mut *strategy);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }
    Ok(())
}

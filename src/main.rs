use std::io::{self, Write};
use std::time::Instant;

use clap::{Parser, ValueEnum};
use env_logger::{Builder, Target};
use log::{info, Level, LevelFilter};

use u_gridtsp::problem::io::{read_point_set, write_tour};
use u_gridtsp::{Error, Outcome, Result, TspConfig, TspSolver};

/// Approximate TSP tours via grid-partitioned binary quadratic encodings.
///
/// Reads a point count followed by that many `x y` pairs from stdin.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Even grid dimension (>= 2) for partitioning; omit for the plain
    /// encoding.
    #[arg(long)]
    grid_size: Option<usize>,

    /// Random seed for the annealer.
    #[arg(long)]
    seed: Option<u64>,

    /// Pipeline runs; the shortest feasible tour is printed.
    #[arg(long, default_value_t = 1)]
    attempts: usize,

    /// Scale of the exclusivity constraints relative to the objective.
    #[arg(long)]
    constraint_scale: Option<f64>,

    /// Print the visited coordinates before the total distance.
    #[arg(long)]
    detail: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
        }
    }
}

fn init_logger(level: LogLevel) -> Result<()> {
    Builder::new()
        .filter_level(level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| Error::invalid_config(format!("logger init failed: {e}")))
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn config_from(args: &Args) -> TspConfig {
    let mut config = TspConfig::default().with_attempts(args.attempts);
    config = match args.grid_size {
        Some(grid_size) => config.with_grid_size(grid_size),
        None => config.plain(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(scale) = args.constraint_scale {
        config.weights = config.weights.with_constraint_scale(scale);
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level)?;

    let now = Instant::now();
    let config = config_from(&args);
    let mut solver = TspSolver::new(config)?;

    let points = read_point_set(io::stdin().lock())?;
    info!("input: n={} strategy={:?}", points.len(), config.strategy);

    let outcome = solver.solve(&points)?;
    info!("time={:.2}s", now.elapsed().as_secs_f32());

    match outcome {
        Outcome::Feasible { tour, .. } => write_tour(io::stdout().lock(), &points, &tour, args.detail),
        Outcome::Infeasible { defect, .. } => Err(Error::Infeasible(defect.to_string())),
    }
}

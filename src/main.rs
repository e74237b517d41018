//! Knight's tour solver and player.
//!
//! ## Usage
//!
//! - `knights-tour` - Show a demo
//! - `knights-tour solve --start e4 --closed` - Solve one tour and print it
//! - `knights-tour play` - Start the text protocol on stdin

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use knights_tour::board::{Grid, validate_tour};
use knights_tour::config::{SessionConfig, SolveConfig};
use knights_tour::position::{Position, parse_coord};
use knights_tour::protocol::TourShell;
use knights_tour::search::{SolveOutcome, Solver};
use knights_tour::session::Mode;

/// Knight's tour: Warnsdorff-ordered backtracking search on an 8x8 board
#[derive(Parser)]
#[command(name = "knights-tour")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a complete tour and print it
    Solve {
        /// Start square in algebraic notation
        #[arg(long, default_value = "a8", conflicts_with = "random")]
        start: String,
        /// Pick a random start square
        #[arg(long)]
        random: bool,
        /// Seed for --random
        #[arg(long, requires = "random")]
        seed: Option<u64>,
        /// Require the tour to end a knight move from the start
        #[arg(long)]
        closed: bool,
        /// Give up after this many search nodes
        #[arg(long)]
        max_nodes: Option<u64>,
        /// Disable dead-end pruning
        #[arg(long)]
        no_prune: bool,
    },
    /// Start the text protocol on stdin/stdout
    Play {
        /// manual, greedy or solver
        #[arg(long, default_value = "manual")]
        mode: Mode,
        /// Prefer closed tours
        #[arg(long)]
        closed: bool,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Some(Commands::Solve {
            start,
            random,
            seed,
            closed,
            max_nodes,
            no_prune,
        }) => {
            let start = if random {
                random_square(seed)
            } else {
                parse_coord(&start).with_context(|| format!("bad --start {start:?}"))?
            };
            let config = SolveConfig {
                prefer_closed: closed,
                max_nodes,
                prune: !no_prune,
            };
            run_solve(start, config)
        }
        Some(Commands::Play { mode, closed }) => {
            let config = SessionConfig {
                mode,
                prefer_closed: closed,
                ..SessionConfig::default()
            };
            info!(%mode, closed, "protocol session started");
            TourShell::with_config(config)
                .run()
                .context("protocol I/O failed")
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn random_square(seed: Option<u64>) -> Position {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    Position::new(rng.u8(0..8), rng.u8(0..8))
}

fn run_solve(start: Position, config: SolveConfig) -> Result<()> {
    let mut solver = Solver::new(config);
    let outcome = solver.solve(start);
    let stats = solver.stats();

    let path = match outcome {
        SolveOutcome::Tour(path) => path,
        SolveOutcome::Exhausted => bail!("no tour of the requested kind exists from {start}"),
        SolveOutcome::NodeLimit => bail!(
            "search from {start} stopped after {} nodes without a tour",
            stats.nodes
        ),
    };
    let kind = validate_tour(&path).context("solver produced an invalid tour")?;

    println!("{}", Grid::from_path(&path));
    let notation: Vec<String> = path.iter().map(|p| p.to_string()).collect();
    println!("{}", notation.join(" "));
    println!(
        "{kind:?} tour from {start}: nodes={} backtracks={} pruned={}",
        stats.nodes, stats.backtracks, stats.pruned
    );
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Knight's Tour: Warnsdorff + backtracking\n");

    let start = Position::new(0, 0);
    println!("=== Open tour from {start} ===");
    run_solve(start, SolveConfig::open())?;

    println!("\n=== Closed tour from {start} ===");
    run_solve(start, SolveConfig::closed())
}

//! Command-line front end: scramble generation, solving, table warm-up.

#![warn(clippy::pedantic)]

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::eyre;
use cube_core::notation::{format_sequence, parse_sequence};
use cube_core::random::{random_cube, Mulberry32};
use cube_core::{CubieCube, Move};
use log::LevelFilter;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use twophase::{SolveConfig, Solution, Tables, TwoPhaseSolver};

/// Generates scrambles for random cube states with a two-phase solver
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the pruning-table cache directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scrambles for uniformly random cube states
    Scramble {
        /// How many scrambles to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,

        /// PRNG seed; defaults to a clock-derived value
        #[arg(long)]
        seed: Option<u32>,

        /// Stop improving once a solution is this short
        #[arg(long, default_value_t = 24)]
        target_length: u8,

        #[arg(long, value_enum, default_value = "standard")]
        format: Format,
    },
    /// Solve the state reached by applying a move sequence to a solved cube
    Solve {
        /// Whitespace-separated face turns, e.g. "R U R' U'"
        sequence: String,

        #[arg(long, value_enum, default_value = "standard")]
        format: Format,
    },
    /// Build the pruning tables and write them to the cache
    GenTables,
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Space-separated move sequence
    Standard,
    /// Move sequence without separators
    Compact,
    /// One JSON report per line
    Json,
}

#[derive(Serialize)]
struct Report {
    scramble: String,
    solution: String,
    length: usize,
    phase1: String,
    phase2: String,
    phase1_nodes: u64,
    phase2_nodes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
}

impl Report {
    fn new(result: &Solution, seed: Option<u32>) -> Report {
        Report {
            scramble: format_sequence(&result.scramble),
            solution: format_sequence(&result.solution),
            length: result.solution.len(),
            phase1: format_sequence(&result.phase1),
            phase2: format_sequence(&result.phase2),
            phase1_nodes: result.stats.phase1_nodes,
            phase2_nodes: result.stats.phase2_nodes,
            seed,
        }
    }
}

fn compact(moves: &[Move]) -> String {
    moves.iter().map(ToString::to_string).collect()
}

fn print_result(
    result: &Solution,
    moves: &[Move],
    format: Format,
    seed: Option<u32>,
) -> color_eyre::Result<()> {
    match format {
        Format::Standard => println!("{}", format_sequence(moves)),
        Format::Compact => println!("{}", compact(moves)),
        Format::Json => println!("{}", serde_json::to_string(&Report::new(result, seed))?),
    }
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Scramble {
            count,
            seed,
            target_length,
            format,
        } => {
            let tables = Tables::load_or_generate(cli.cache_dir.as_deref());
            let solver = TwoPhaseSolver::new(&tables);
            let config = SolveConfig {
                target_length,
                ..SolveConfig::default()
            };

            let seed = seed.unwrap_or_else(clock_seed);
            let mut rng = Mulberry32::new(seed);
            for _ in 0..count {
                let cube = random_cube(&mut rng);
                let result = solver.solve_with(&cube, &config)?;
                print_result(&result, &result.scramble, format, Some(seed))?;
            }
        }
        Commands::Solve { sequence, format } => {
            let moves = parse_sequence(&sequence)?;
            let cube = CubieCube::SOLVED.apply_moves(&moves);
            let tables = Tables::load_or_generate(cli.cache_dir.as_deref());
            let solver = TwoPhaseSolver::new(&tables);
            let result = solver.solve(&cube)?;
            print_result(&result, &result.solution, format, None)?;
        }
        Commands::GenTables => {
            let tables = Tables::generate();
            tables.store(cli.cache_dir.as_deref())?;
            let dir = twophase::cache::resolve_dir(cli.cache_dir.as_deref())
                .ok_or_else(|| eyre!("no cache directory available"))?;
            println!("tables written to {}", dir.display());
        }
    }

    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() ^ elapsed.as_secs() as u32)
        .unwrap_or(0)
}

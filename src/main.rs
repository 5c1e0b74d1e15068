//! Huarong Dao Solver
//!
//! Solves the classic sliding-block puzzle, or any layout read from a text
//! file, and prints the shortest path one step at a time.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;

use clap::{Args, Parser, Subcommand};
use log::error;

use huarong::layout::{self, Layout};
use huarong::pieces::{STANDARD_COLUMNS, STANDARD_ROWS};
use huarong::{standard_pieces, Configuration, Engine, Position};

/// Solves Huarong Dao sliding-block puzzles.
#[derive(Parser)]
#[command(name = "huarong")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Find the shortest solution and print every step.
    Solve(SolveArgs),
    /// Print a layout without solving it.
    Show {
        /// Layout file; the standard layout when omitted.
        #[arg(long)]
        layout: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct SolveArgs {
    /// Layout file; the standard layout when omitted.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Goal cell of the general's top-left corner, as `x,y`.
    #[arg(long, value_parser = parse_position)]
    goal: Option<Position>,
    /// Keep mirror-image boards as separate search states.
    #[arg(long)]
    no_mirror: bool,
    /// Let a two-cell slide turn a corner.
    #[arg(long)]
    any_direction: bool,
    /// Seed for the hash table, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Only print the step count.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve(args)) => run_solver(&args),
        Some(Command::Show { layout }) => run_show(layout.as_deref()),
        // default: solve the standard layout
        None => run_solver(&SolveArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Parses `x,y` into a board position.
fn parse_position(text: &str) -> Result<Position, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{text}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok((x, y))
}

/// Reads a layout file, or returns the standard layout.
fn load_layout(path: Option<&Path>) -> Result<Layout, String> {
    let Some(path) = path else {
        return Ok(Layout {
            columns: STANDARD_COLUMNS,
            rows: STANDARD_ROWS,
            pieces: standard_pieces(),
        });
    };

    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    layout::parse(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// Solves on the engine's worker thread and prints the outcome.
fn run_solver(args: &SolveArgs) -> Result<(), String> {
    let layout = load_layout(args.layout.as_deref())?;

    let mut config = Configuration::standard()
        .with_size(layout.columns, layout.rows)
        .with_mirror_exclusion(!args.no_mirror)
        .with_different_direction_double_move(args.any_direction);
    if let Some(goal) = args.goal {
        config = config.with_goal(goal);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let (sender, receiver) = mpsc::channel();
    let mut engine = Engine::new();
    let handle = engine
        .solve(layout.pieces, config, move |path| {
            // the receiver outlives the worker
            let _ = sender.send(path);
        })
        .map_err(|e| e.to_string())?;
    handle.join();

    match receiver.recv() {
        Ok(Some(path)) => {
            if !args.quiet {
                print!("{}", layout::format_path(&path));
            }
            let steps = path.last().map_or(0, |board| board.step());
            println!("Solved in {steps} steps");
            Ok(())
        }
        Ok(None) => {
            println!("No solution");
            Ok(())
        }
        Err(_) => Err("solver finished without a result".to_string()),
    }
}

/// Prints a layout as the solver sees it.
fn run_show(path: Option<&Path>) -> Result<(), String> {
    let layout = load_layout(path)?;
    print!(
        "{}",
        layout::format(&layout.pieces, layout.columns, layout.rows)
    );
    for (index, piece) in layout.pieces.iter().enumerate() {
        println!("{:>2}: {:<22} {:?} at {:?}", index + 1, piece.label, piece.kind, piece.position);
    }
    Ok(())
}

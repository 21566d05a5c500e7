//! Hex Power command-line runner (default binary).
//!
//! `serve` hosts a puzzle for TCP clients, `play` applies a move script and
//! prints what each move did, `show` prints a puzzle's cells and targets.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use hex_power::adapter::Adapter;
use hex_power::engine::{parse_script, replay, HexPuzzle};
use hex_power::types::{CellKind, Direction, DEFAULT_DEFINITION};

/// Play hexagonal rotate/switch power puzzles.
#[derive(Parser)]
#[command(name = "hex-power", version, about = "Hexagonal power puzzle engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Host the puzzle over the JSON line protocol (HEX_POWER_HOST / HEX_POWER_PORT).
    Serve(Source),
    /// Apply moves such as `s:0,1 r:2,3` and report each outcome.
    Play {
        #[command(flatten)]
        source: Source,
        /// Moves: `r:ROW,COL` rotates, `s:ROW,COL` switches.
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Print the puzzle's cells and targets.
    Show(Source),
}

/// Where the puzzle definition comes from.
///
/// Falls back to `HEX_POWER_DEFINITION`, then to the built-in puzzle.
#[derive(Args)]
struct Source {
    /// Inline definition, e.g. "hex 3x3 0,1,dn,bb,up,0 2,1,tg,tt,up,1".
    #[arg(long, conflicts_with = "file")]
    definition: Option<String>,

    /// Read the definition from a file.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl Source {
    fn load(&self) -> Result<HexPuzzle> {
        let definition = match (&self.definition, &self.file) {
            (Some(definition), _) => definition.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            (None, None) => std::env::var("HEX_POWER_DEFINITION")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DEFINITION.to_string()),
        };
        HexPuzzle::load(&definition)
            .with_context(|| format!("loading puzzle `{}`", definition.trim()))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Serve(source) => serve(source.load()?),
        Command::Play { source, moves } => play(source.load()?, &moves.join(" ")),
        Command::Show(source) => {
            show(&source.load()?);
            Ok(())
        }
    }
}

fn serve(mut puzzle: HexPuzzle) -> Result<()> {
    info!(
        "serving {}x{} puzzle",
        puzzle.grid().rows(),
        puzzle.grid().cols()
    );
    let mut adapter = Adapter::start_from_env()?;
    adapter.run(&mut puzzle);
    bail!("adapter stopped")
}

fn play(mut puzzle: HexPuzzle, script: &str) -> Result<()> {
    let moves = parse_script(script)?;

    for (i, step) in replay(&mut puzzle, &moves).iter().enumerate() {
        let pos = step.mv.position();
        match &step.result {
            Ok(outcome) => {
                let changed: Vec<String> = outcome
                    .changed
                    .iter()
                    .map(|&p| format!("{}={}", p, puzzle.grid()[p].power()))
                    .collect();
                println!(
                    "{:>3}. {} {}: changed [{}]{}",
                    i + 1,
                    step.mv.as_str(),
                    pos,
                    changed.join(" "),
                    if outcome.completed { " COMPLETED" } else { "" }
                );
            }
            Err(rejection) => {
                println!(
                    "{:>3}. {} {}: ignored ({})",
                    i + 1,
                    step.mv.as_str(),
                    pos,
                    rejection.message()
                );
            }
        }
    }

    println!();
    show(&puzzle);
    Ok(())
}

fn show(puzzle: &HexPuzzle) {
    let grid = puzzle.grid();
    println!("{}", grid.to_definition());
    println!("{}x{} grid", grid.rows(), grid.cols());

    for cell in grid.cells() {
        if cell.kind() == CellKind::Path && cell.power() == 0 && cell.direction() == Direction::Top {
            continue;
        }
        println!(
            "  {:<6} {:<3} {} power {:>2}",
            cell.position().to_string(),
            cell.kind().as_code(),
            cell.direction().as_code(),
            cell.power()
        );
    }

    for status in puzzle.target_statuses() {
        println!(
            "  target {}: {}/{}{}",
            status.position,
            status.power,
            status.target_power,
            if status.satisfied { " ok" } else { "" }
        );
    }
    println!(
        "completed: {}",
        if puzzle.is_completed() { "yes" } else { "no" }
    );
}

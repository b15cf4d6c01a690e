//! The `gridlace` binary: solve delimited puzzle files from the command
//! line.
//!
//! # Usage
//!
//! ```sh
//! gridlace puzzle.txt
//! gridlace puzzle.txt --anti-knight
//! gridlace puzzle.txt --cages cages.txt --output solved.txt
//! gridlace puzzle.txt --verify
//! ```
//!
//! Exit codes: `0` solved (or verified clean), `1` no solution (or a
//! verify violation), `2` malformed input.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::{fs, io};

use clap::Parser;
use derive_more::{Display, Error, From};
use gridlace_core::{Board, ParseError};
use gridlace_solver::{
    AdjacencyExclusion, CageCombinatorics, Outcome, Solver, SumRegion, classic_rules,
};
use log::info;

use crate::cages::CageParseError;

mod cages;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle file: comma-separated rows, 0 = blank, letters for 10+.
    puzzle: PathBuf,

    /// Killer cage file: one `TARGET: x,y x,y ...` per line.
    #[arg(long, value_name = "FILE")]
    cages: Option<PathBuf>,

    /// Forbid repeated digits a knight's move apart.
    #[arg(long)]
    anti_knight: bool,

    /// Seed for guess tie-breaking.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the solved grid to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Check the given grid against the rule set and exit.
    #[arg(long)]
    verify: bool,

    /// Print each committed cell and guess while solving.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Display, Error, From)]
enum CliError {
    #[display("{_0}")]
    Io(io::Error),
    #[display("invalid puzzle: {_0}")]
    Puzzle(ParseError),
    #[display("invalid cage file: {_0}")]
    Cages(CageParseError),
    #[display("cage rules need a 9x9 board, got {side}x{side}")]
    #[from(ignore)]
    CagesNeedNineByNine {
        side: u8,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, CliError> {
    let board = Board::from_text(&fs::read_to_string(&args.puzzle)?)?;

    let mut rules = classic_rules(board.side());
    if args.anti_knight {
        rules.push(Box::new(AdjacencyExclusion::anti_knight()));
    }
    if let Some(path) = &args.cages {
        if board.side() != 9 {
            return Err(CliError::CagesNeedNineByNine { side: board.side() });
        }
        let combinatorics = Arc::new(CageCombinatorics::new());
        for (target, region) in cages::parse(&fs::read_to_string(path)?, board.side())? {
            rules.push(Box::new(SumRegion::new(
                region,
                target,
                Arc::clone(&combinatorics),
            )));
        }
    }

    let mut solver = Solver::new(rules).with_seed(args.seed);

    if args.verify {
        return Ok(match solver.verify(&board) {
            Ok(()) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(violation) => {
                eprintln!("{violation}");
                ExitCode::FAILURE
            }
        });
    }

    if args.trace {
        solver = solver.with_observer(|_, pos, is_guess| {
            if is_guess {
                println!("guess   {pos}");
            } else {
                println!("commit  {pos}");
            }
        });
    }

    let (outcome, stats) = solver.solve(&board);
    match outcome {
        Outcome::Solved(solved) => {
            info!(
                "solved with {} guesses over {} propagation runs",
                stats.guesses(),
                stats.propagations()
            );
            match &args.output {
                Some(path) => fs::write(path, format!("{solved}\n"))?,
                None => println!("{solved}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::NoSolution => {
            // when the givens themselves break a rule, say which one
            match solver.verify(&board) {
                Err(violation) => eprintln!("no solution: {violation}"),
                Ok(()) => eprintln!("no solution"),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

use clap::Parser;
use gridpath_solver::solver::{solve_bfs, SearchDirection, SearchOutcome};
use gridpath_solver::utils::{board_from_reader, format_path, CoordinateBase};
use gridpath_solver::{Board, GridError};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the grid file; the grid is read from standard input when omitted
    board_file: Option<PathBuf>,

    /// Also print the board with the path drawn on it
    #[clap(short, long)]
    render: bool,

    /// Print 0-based coordinates instead of 1-based ones
    #[clap(short, long)]
    zero_based: bool,

    /// Search from the goal back to the start
    #[clap(short, long)]
    backward: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_board(path: Option<&PathBuf>) -> Result<Board, GridError> {
    match path {
        Some(path) => {
            tracing::info!("reading grid from {}", path.display());
            board_from_reader(BufReader::new(File::open(path)?))
        }
        None => {
            tracing::info!("reading grid from standard input");
            board_from_reader(io::stdin().lock())
        }
    }
}

fn run(args: &Args) -> Result<(), GridError> {
    let board = read_board(args.board_file.as_ref())?;
    let direction = if args.backward {
        SearchDirection::Backward
    } else {
        SearchDirection::Forward
    };
    let base = if args.zero_based {
        CoordinateBase::ZeroBased
    } else {
        CoordinateBase::OneBased
    };

    let report = solve_bfs(&board, direction)?;
    tracing::info!(
        expanded = report.stats.expanded,
        discovered = report.stats.discovered,
        peak_frontier = report.stats.peak_frontier,
        "search finished"
    );

    match &report.outcome {
        SearchOutcome::Found(path) => {
            print!("{}", format_path(path, base));
            if args.render {
                println!("\n{}", board.to_string_with_path(path.cells()));
            }
        }
        SearchOutcome::NotFound => {
            println!("No path found.");
            if args.render {
                println!("\n{}", board);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

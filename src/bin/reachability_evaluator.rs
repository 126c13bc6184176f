use clap::Parser;
use gridpath_solver::solver::{solve_bfs, SearchDirection, SearchOutcome};
use gridpath_solver::Board;
use std::process::ExitCode;
use tracing::Level;

const WALL_DENSITIES: [f64; 6] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random boards per wall density
    #[clap(short, long, default_value_t = 100)]
    boards: u64,

    /// Rows per board
    #[clap(short, long, default_value_t = 20)]
    rows: usize,

    /// Columns per board
    #[clap(short, long, default_value_t = 20)]
    cols: usize,

    /// Seed of the first board; later boards use consecutive seeds
    #[clap(short = 's', long, default_value_t = 0)]
    start_seed: u64,

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
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Default)]
struct DensitySummary {
    reachable: u64,
    total_moves: usize,
    total_expanded: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    println!(
        "Evaluating {} boards of {}x{} per wall density...\n",
        args.boards, args.rows, args.cols
    );
    println!(
        "{:>8} {:>10} {:>12} {:>14}",
        "density", "reachable", "avg moves", "avg expanded"
    );

    for density in WALL_DENSITIES {
        let mut summary = DensitySummary::default();

        for board_idx in 0..args.boards {
            let seed = args.start_seed + board_idx;
            let board = match Board::new_random_with_seed(args.rows, args.cols, density, seed) {
                Ok(board) => board,
                Err(err) => {
                    eprintln!("error: {err}");
                    return ExitCode::FAILURE;
                }
            };

            let report = match solve_bfs(&board, SearchDirection::Forward) {
                Ok(report) => report,
                Err(err) => {
                    tracing::warn!(seed, "skipping board: {err}");
                    continue;
                }
            };

            summary.total_expanded += report.stats.expanded;
            if let SearchOutcome::Found(path) = &report.outcome {
                summary.reachable += 1;
                summary.total_moves += path.edge_count();
            }
        }

        let avg_moves = if summary.reachable > 0 {
            summary.total_moves as f64 / summary.reachable as f64
        } else {
            0.0
        };
        let avg_expanded = if args.boards > 0 {
            summary.total_expanded as f64 / args.boards as f64
        } else {
            0.0
        };
        println!(
            "{:>8.2} {:>9.1}% {:>12.2} {:>14.2}",
            density,
            100.0 * summary.reachable as f64 / args.boards.max(1) as f64,
            avg_moves,
            avg_expanded
        );
    }

    ExitCode::SUCCESS
}

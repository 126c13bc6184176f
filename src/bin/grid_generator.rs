use clap::Parser;
use gridpath_solver::Board;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of rows in the generated grid
    #[clap(short, long)]
    rows: usize,

    /// Number of columns in the generated grid
    #[clap(short, long)]
    cols: usize,

    /// Probability that a cell becomes a wall
    #[clap(short, long, default_value_t = 0.25)]
    density: f64,

    /// Seed for the random number generator
    #[clap(short, long, default_value_t = 514514)]
    seed: u64,

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

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match Board::new_random_with_seed(args.rows, args.cols, args.density, args.seed) {
        Ok(board) => {
            tracing::info!(
                rows = args.rows,
                cols = args.cols,
                seed = args.seed,
                "generated grid"
            );
            print!("{}", board.to_input_string());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

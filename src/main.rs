//! # splitsat
//!
//! `splitsat` is a command-line DPLL SAT solver built around comparable
//! branching heuristics. It parses CNF problems in DIMACS format, plain text
//! CNF, or Sudoku boards (converted to CNF), and solves them with a
//! copy-on-branch DPLL search.
//!
//! ## Subcommands
//!
//! 1.  **`solve`**: Solve a DIMACS .cnf file.
//!     ```sh
//!     splitsat solve --path <path_to_cnf_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Solve a CNF formula provided as plain text.
//!     ```sh
//!     splitsat text --input "1 -2 0\n2 3 0" [OPTIONS]
//!     ```
//!
//! 3.  **`dir`**: Solve every .cnf file under a directory, recursively.
//!     ```sh
//!     splitsat dir --path <directory> [OPTIONS]
//!     ```
//!
//! 4.  **`sudoku`**: Solve a Sudoku board file, or generate a random puzzle.
//!     ```sh
//!     splitsat sudoku --path <path_to_board_file> [OPTIONS]
//!     splitsat sudoku --generate 24 --size 9 [OPTIONS]
//!     ```
//!
//! 5.  **`completions`**: Generate shell completion scripts.
//!
//! A path given without a subcommand is treated as a DIMACS .cnf file.
//!
//! ## Common options
//!
//! -   `--heuristic <fifo|dlcs|dlis|most-frequent-digit>`: branching
//!     heuristic (default: `fifo`).
//! -   `--directions <true-first|false-first|positive-only|negative-only>`:
//!     polarity exploration order (default: `true-first`). The single-polarity
//!     policies are deliberately incomplete.
//! -   `--pure-literals`: enable pure-literal elimination.
//! -   `--no-preprocess`: skip the initial simplification pass.
//! -   `--limit <N>`: decision-call budget (default: 1000000).
//! -   `--verify`: check the model against the original formula.
//! -   `--stats`: print problem and search statistics.
//! -   `-p, --print-solution`: print the satisfying assignment.
//! -   `--write-model <path>`: write the model as DIMACS unit clauses.

use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use splitsat::dpll::cnf::ClauseDb;
use splitsat::dpll::dimacs::{find_cnf_files, parse_file, parse_text, write_model};
use splitsat::dpll::solver::{
    Counters, DEFAULT_DECISION_LIMIT, DirectionPolicy, Heuristic, Options, Report, Solver, Status,
};
use splitsat::sudoku::{Size, Sudoku};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// usage figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "splitsat", version, about = "A DPLL SAT solver with comparable branching heuristics")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a CNF file in DIMACS format.
    Solve {
        /// Path to the DIMACS .cnf file.
        #[arg(short, long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g., "1 -2 0\n2 3 0").
        /// Each line is a clause of space-separated literals terminated by 0.
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file under a directory, recursively.
    Dir {
        /// Directory to scan for .cnf files.
        #[arg(short, long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a Sudoku board, or generate a fresh puzzle.
    /// The board is converted into a CNF formula, which is then solved.
    Sudoku {
        /// Path to the board file: one line per row, cells separated by
        /// whitespace, `0`, `.` or `-` for an empty cell.
        #[arg(short, long, conflicts_with = "generate")]
        path: Option<PathBuf>,

        /// Generate a random puzzle with this many clues instead of reading
        /// a file.
        #[arg(short, long)]
        generate: Option<usize>,

        /// Board side length for generated puzzles. Supported: 4, 9.
        #[arg(long, default_value_t = 9)]
        size: usize,

        /// Print and save the generated DIMACS CNF representation of the
        /// board.
        #[arg(short, long, default_value_t = false)]
        export_dimacs: bool,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
struct CommonOptions {
    /// Branching heuristic used at every case split.
    #[arg(long, value_enum, default_value_t = Heuristic::Fifo)]
    heuristic: Heuristic,

    /// Polarity exploration order. The single-polarity policies are
    /// incomplete and may report a satisfiable formula as exhausted.
    #[arg(long, value_enum, default_value_t = DirectionPolicy::TrueFirst)]
    directions: DirectionPolicy,

    /// Enable pure-literal elimination in the simplification loop.
    #[arg(long, default_value_t = false)]
    pure_literals: bool,

    /// Skip the initial simplification pass over the formula.
    #[arg(long, default_value_t = false)]
    no_preprocess: bool,

    /// Decision-call budget; the search aborts once it is exceeded.
    #[arg(long, default_value_t = DEFAULT_DECISION_LIMIT)]
    limit: u64,

    /// Check the found model against the original formula.
    #[arg(long, default_value_t = true)]
    verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, default_value_t = true)]
    stats: bool,

    /// Print the satisfying assignment (model) if one is found.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,

    /// Write the model to a file as DIMACS unit clauses.
    #[arg(long)]
    write_model: Option<PathBuf>,
}

impl CommonOptions {
    fn to_options(&self) -> Options {
        Options {
            heuristic: self.heuristic,
            directions: self.directions.order().to_vec(),
            pure_literals: self.pure_literals,
            preprocess: !self.no_preprocess,
            decision_limit: self.limit,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // A bare path defaults to solving a DIMACS file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            solve_path(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => solve_path(&path, &common),

        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            let db = parse_text(&input);
            let parse_time = time.elapsed();
            solve_and_report(db, &common, parse_time);
        }

        Some(Commands::Dir { path, common }) => {
            let files = find_cnf_files(&path)
                .unwrap_or_else(|e| panic!("Failed to scan {}: {e}", path.display()));
            if files.is_empty() {
                println!("No .cnf files under {}", path.display());
            }
            for file in files {
                println!("\n>>> {}", file.display());
                solve_path(&file, &common);
            }
        }

        Some(Commands::Sudoku {
            path,
            generate,
            size,
            export_dimacs,
            common,
        }) => {
            let board = match (path, generate) {
                (Some(path), None) => Sudoku::parse_file(&path)
                    .unwrap_or_else(|e| panic!("Failed to parse board {}: {e}", path.display())),
                (None, Some(clues)) => {
                    let size = Size::try_from(size)
                        .unwrap_or_else(|()| panic!("Unsupported board size: {size}"));
                    splitsat::sudoku::generate(size, clues)
                }
                _ => panic!("Provide exactly one of --path and --generate"),
            };
            println!("Board:\n{board}");

            let time = std::time::Instant::now();
            let db = board.to_cnf();
            let parse_time = time.elapsed();

            if export_dimacs {
                let dimacs = db.to_string();
                println!("DIMACS:\n{dimacs}");
                std::fs::write("board.cnf", dimacs)
                    .unwrap_or_else(|e| panic!("Unable to write board.cnf: {e}"));
                println!("DIMACS written to: board.cnf");
            }

            let report = solve_and_report(db, &common, parse_time);
            if report.status.is_sat() {
                println!("Solution:\n{}", board.decode(&report.assignment));
            }
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            Cli::command()
                .print_help()
                .unwrap_or_else(|e| panic!("Failed to print help: {e}"));
        }
    }
}

fn solve_path(path: &Path, common: &CommonOptions) {
    let time = std::time::Instant::now();
    let db =
        parse_file(path).unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()));
    let parse_time = time.elapsed();
    solve_and_report(db, common, parse_time);
}

/// Runs one solve, then prints, verifies and exports per the options.
fn solve_and_report(db: ClauseDb, common: &CommonOptions, parse_time: Duration) -> Report {
    let mut solver = Solver::with_options(db, common.to_options());

    let time = std::time::Instant::now();
    let report = solver.solve();
    let elapsed = time.elapsed();

    // Advance the epoch so the figures reflect the solving phase.
    epoch::advance().unwrap();
    let allocated = stats::allocated::mib().unwrap().read().unwrap();
    let resident = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated as f64 / (1024.0 * 1024.0);
    let resident_mib = resident as f64 / (1024.0 * 1024.0);

    if common.verify && report.status.is_sat() {
        if solver.verify(&report.assignment) {
            println!("Solution verified against the original formula.");
        } else {
            println!("WARNING: solution failed verification!");
        }
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &solver,
            allocated_mib,
            resident_mib,
            &report,
        );
    }

    if common.print_solution && report.status.is_sat() {
        let model = report
            .assignment
            .domain()
            .iter()
            .map(|&var| match report.assignment.var_value(var) {
                Some(true) => format!("{var}"),
                _ => format!("-{var}"),
            })
            .join(" ");
        println!("Model: {model}");
    }

    if let Some(path) = &common.write_model {
        if report.status.is_sat() {
            let mut file = std::fs::File::create(path)
                .unwrap_or_else(|e| panic!("Unable to create {}: {e}", path.display()));
            write_model(&mut file, &report.assignment)
                .unwrap_or_else(|e| panic!("Unable to write {}: {e}", path.display()));
            println!("Model written to: {}", path.display());
        } else {
            println!("No model to write.");
        }
    }

    print_status(report.status);
    report
}

fn print_status(status: Status) {
    match status {
        Status::Satisfiable => println!("\nSATISFIABLE"),
        Status::Unsatisfiable => println!("\nUNSATISFIABLE"),
        Status::DirectionsExhausted => println!("\nDIRECTIONS EXHAUSTED (inconclusive)"),
        Status::LimitExceeded => println!("\nLIMIT EXCEEDED (inconclusive)"),
    }
}

/// Prints one statistics table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {:<26} {:>24}  |", label, value.to_string());
}

/// Prints one statistics table row with a per-second rate.
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {:<26} {:>12} ({:>9.0}/sec)  |", label, value, rate);
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    solver: &Solver,
    allocated_mib: f64,
    resident_mib: f64,
    report: &Report,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let counters: &Counters = solver.counters();
    let num_literals: usize = solver.clauses().iter().map(splitsat::dpll::clause::Clause::len).sum();

    println!("\n====================[ Problem Statistics ]====================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", solver.clauses().variables().len());
    stat_line("Clauses", solver.clauses().len());
    stat_line("Literals", num_literals);

    println!("=====================[ Search Statistics ]====================");
    stat_line_with_rate("Decisions", counters.decisions, elapsed_secs);
    stat_line_with_rate("Branch trials", counters.branch_trials, elapsed_secs);
    stat_line_with_rate("Literal searches", counters.literal_searches, elapsed_secs);
    stat_line_with_rate("Literal iterations", counters.literal_iterations, elapsed_secs);
    stat_line("Clauses unresolved", report.clauses.len());
    stat_line("Memory usage (MiB)", format!("{allocated_mib:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident_mib:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("==============================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_options_to_options() {
        let common = CommonOptions {
            heuristic: Heuristic::Dlis,
            directions: DirectionPolicy::NegativeOnly,
            pure_literals: true,
            no_preprocess: true,
            limit: 42,
            ..CommonOptions::default()
        };
        let options = common.to_options();
        assert_eq!(options.heuristic, Heuristic::Dlis);
        assert_eq!(options.directions, vec![false]);
        assert!(options.pure_literals);
        assert!(!options.preprocess);
        assert_eq!(options.decision_limit, 42);
    }

    #[test]
    fn test_default_options_match_solver_defaults() {
        // The derived default has a zero limit; clap fills in the real one.
        let expected = Options {
            decision_limit: 0,
            ..Options::default()
        };
        assert_eq!(CommonOptions::default().to_options(), expected);
    }
}

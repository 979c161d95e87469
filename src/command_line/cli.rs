#![allow(clippy::cast_precision_loss)]

use cdcl_sat::sat::cdcl::Cdcl;
use cdcl_sat::sat::cnf::Cnf;
use cdcl_sat::sat::configs::{MinimizationType, SolverOptions};
use cdcl_sat::sat::dimacs::{DimacsError, parse_dimacs, parse_file};
use cdcl_sat::sat::restarter::RestarterType;
use cdcl_sat::sat::solver::{Interrupt, Progress, SolutionStats, SolveStatus, Solver};
use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use std::fmt::{self, Display};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

const PROGRESS_PERIOD: Duration = Duration::from_secs(3);

/// Defines the command-line interface of the solver.
#[derive(Parser, Debug)]
#[command(name = "cdcl-sat", version, about = "A CDCL SAT solver")]
pub(crate) struct Cli {
    /// Path to a DIMACS .cnf file, solved when no subcommand is given.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long = "path", id = "file_path", value_name = "PATH")]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula given as DIMACS text.
    Text {
        /// Clauses as space-separated literals, each terminated by 0 (e.g. "1 -2 0\n2 3 0").
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file below a directory.
    Dir {
        #[arg(long = "path", id = "dir_path", value_name = "PATH")]
        path: PathBuf,

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

/// Options shared by every solving subcommand.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Print problem statistics, a progress table while solving and search statistics.
    #[arg(short, long, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Stop after this many seconds and report INDETERMINATE.
    #[arg(short, long)]
    pub(crate) time_limit: Option<u64>,

    /// Print the satisfying assignment as a `v` line.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_model: bool,

    /// Check the model against the formula before reporting SATISFIABLE.
    #[arg(long, default_value_t = false)]
    pub(crate) verify: bool,

    #[arg(long, value_enum, default_value_t = RestarterType::Luby)]
    pub(crate) restart_policy: RestarterType,

    /// Conflicts allowed in the first run before restarting.
    #[arg(long, default_value_t = 100)]
    pub(crate) restart_first: u64,

    #[arg(long, value_enum, default_value_t = MinimizationType::Basic)]
    pub(crate) minimization: MinimizationType,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            time_limit: None,
            print_model: false,
            verify: false,
            restart_policy: RestarterType::Luby,
            restart_first: 100,
            minimization: MinimizationType::Basic,
        }
    }
}

impl CommonOptions {
    pub(crate) fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            restart_policy: self.restart_policy,
            restart_first: self.restart_first,
            minimization: self.minimization,
            ..SolverOptions::default()
        }
    }
}

/// Failures that end the command line with exit code 1.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Input(#[from] DimacsError),

    #[error("model failed verification: clause {clause} is not satisfied")]
    Verification { clause: usize },
}

/// Why a search ended without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stop {
    Timeout,
    Interrupt,
}

impl Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Interrupt => write!(f, "INTERRUPT"),
        }
    }
}

/// Runs the command line.
///
/// Returns the status of the formula solved, or `None` for commands that do
/// not solve a single formula.
///
/// # Errors
///
/// If an input formula cannot be read or a model fails `--verify`.
pub(crate) fn run(cli: Cli) -> Result<Option<SolveStatus>, CliError> {
    let interrupt = Interrupt::new();
    match (cli.command, cli.path) {
        (None, Some(path)) => {
            install_signal_handler(&interrupt);
            solve_path(&path, &cli.common, &interrupt).map(Some)
        }
        (None, None) => {
            Cli::command().print_help().map_err(DimacsError::from)?;
            Ok(None)
        }
        (Some(Commands::File { path, common }), _) => {
            install_signal_handler(&interrupt);
            solve_path(&path, &common, &interrupt).map(Some)
        }
        (Some(Commands::Text { input, common }), _) => {
            install_signal_handler(&interrupt);
            let time = Instant::now();
            let cnf = parse_text(&input)?;
            solve_and_report(&cnf, &common, None, time.elapsed(), &interrupt).map(Some)
        }
        (Some(Commands::Dir { path, common }), _) => {
            install_signal_handler(&interrupt);
            solve_dir(&path, &common, &interrupt)?;
            Ok(None)
        }
        (Some(Commands::Completions { shell }), _) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_owned();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(None)
        }
    }
}

/// Parses DIMACS text given on the command line, where `\n` may be written
/// as an escape.
pub(crate) fn parse_text(input: &str) -> Result<Cnf, DimacsError> {
    parse_dimacs(Cursor::new(input.replace("\\n", "\n")))
}

/// Raises `interrupt` on SIGINT or SIGTERM.
fn install_signal_handler(interrupt: &Interrupt) {
    let interrupt = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || interrupt.raise()) {
        log::warn!("Signal handler not installed: {e}");
    }
}

fn solve_path(
    path: &Path,
    common: &CommonOptions,
    interrupt: &Interrupt,
) -> Result<SolveStatus, CliError> {
    let time = Instant::now();
    let cnf = parse_file(path)?;
    solve_and_report(&cnf, common, Some(path), time.elapsed(), interrupt)
}

/// Solves every `.cnf` file below `path`, stopping after an interrupted one.
///
/// # Errors
///
/// If the directory cannot be walked, a file cannot be parsed or a model
/// fails `--verify`.
pub(crate) fn solve_dir(
    path: &Path,
    common: &CommonOptions,
    interrupt: &Interrupt,
) -> Result<(), CliError> {
    for entry in walkdir::WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| DimacsError::Io(e.into()))?;
        let file_path = entry.path();
        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }
        solve_path(file_path, common, interrupt)?;
        if interrupt.is_raised() {
            break;
        }
    }
    Ok(())
}

/// Solves `cnf` and prints the result in the SAT competition format.
///
/// `interrupt` is shared with the signal handler; a raised flag stops the
/// search and is left raised, while a flag raised by the time limit is
/// cleared again.
///
/// # Errors
///
/// If `--verify` is given and the model falsifies a clause.
pub(crate) fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
    interrupt: &Interrupt,
) -> Result<SolveStatus, CliError> {
    if let Some(path) = label {
        println!("c Solving {}", path.display());
    }
    if common.verbose {
        print_problem_stats(cnf, parse_time);
    }

    let mut solver = Cdcl::from_cnf(cnf, common.solver_options());
    solver.set_interrupt(interrupt.clone());

    let time = Instant::now();
    let (status, timed_out) = thread::scope(|scope| {
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let (timer_tx, timer_rx) = mpsc::channel::<()>();

        let timer = common.time_limit.map(|secs| {
            let interrupt = interrupt.clone();
            scope.spawn(move || watch_deadline(&timer_rx, Duration::from_secs(secs), &interrupt))
        });
        if common.verbose {
            let progress = solver.progress();
            scope.spawn(move || report_progress(&done_rx, &progress));
        }

        let status = solver.solve();
        drop(done_tx);
        drop(timer_tx);
        let timed_out = timer.is_some_and(|handle| handle.join().unwrap_or(false));
        (status, timed_out)
    });
    let elapsed = time.elapsed();

    let stop = stop_reason(status, timed_out, interrupt);
    if timed_out {
        interrupt.reset();
    }
    if let Some(stop) = stop {
        println!("c {stop}");
    }
    if common.verbose {
        print_search_stats(&solver.stats(), elapsed);
    }

    let model = solver.model_dimacs();
    if common.verify && status.is_sat() {
        verify_model(cnf, &model)?;
        println!("c Model verified");
    }

    println!("s {status}");
    if common.print_model && status.is_sat() {
        println!("v {} 0", model.iter().join(" "));
    }
    Ok(status)
}

fn stop_reason(status: SolveStatus, timed_out: bool, interrupt: &Interrupt) -> Option<Stop> {
    if status != SolveStatus::Indeterminate {
        None
    } else if timed_out {
        Some(Stop::Timeout)
    } else if interrupt.is_raised() {
        Some(Stop::Interrupt)
    } else {
        None
    }
}

fn verify_model(cnf: &Cnf, model: &[i32]) -> Result<(), CliError> {
    match cnf.first_falsified(model) {
        Some(clause) => Err(CliError::Verification { clause }),
        None => Ok(()),
    }
}

/// Raises `interrupt` unless `done` is signalled within `limit`.
fn watch_deadline(done: &mpsc::Receiver<()>, limit: Duration, interrupt: &Interrupt) -> bool {
    if done.recv_timeout(limit) == Err(RecvTimeoutError::Timeout) {
        interrupt.raise();
        true
    } else {
        false
    }
}

fn report_progress(done: &mpsc::Receiver<()>, progress: &Progress) {
    println!("c ============================[ Search Statistics ]=============================");
    println!("c | Restarts | Conflicts  | ReduceDB   | Current Learnt  | Binary Learnt | Unit Learnt |");
    while done.recv_timeout(PROGRESS_PERIOD) == Err(RecvTimeoutError::Timeout) {
        let s = progress.snapshot();
        println!(
            "c | {:>8} | {:>10} | {:>10} |      {:>10} |     {:>9} | {:>5} / {} |",
            s.restarts,
            s.conflicts,
            s.reduce_dbs,
            s.learnts,
            s.binary_learnts,
            s.unit_learnts,
            s.num_vars
        );
    }
}

/// Prints a single statistic as a table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("c |  {label:<28} {value:>18}  |");
}

/// Prints a counter with its rate per second.
pub(crate) fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("c |  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

fn print_problem_stats(cnf: &Cnf, parse_time: Duration) {
    println!("c =======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals());
    println!("c ======================================================================");
}

pub(crate) fn print_search_stats(s: &SolutionStats, elapsed: Duration) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("c ========================[ Search Statistics ]=========================");
    stat_line("Restarts", s.restarts);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line("Reduce DB", s.reduce_dbs);
    stat_line("Removed clauses", s.removed_clauses);
    stat_line("Clauses (original)", s.original_clauses);
    stat_line("Learnt clauses", s.learnt_clauses);
    stat_line("Unit / binary learnts", format!("{} / {}", s.unit_learnts, s.binary_learnts));
    stat_line("Glue learnts (LBD <= 2)", s.glue_learnts);
    if s.max_literals > 0 {
        let deleted = s.max_literals.saturating_sub(s.tot_literals) as f64;
        stat_line(
            "Minimised literals (%)",
            format!("{:.2}", deleted * 100.0 / s.max_literals as f64),
        );
    }
    stat_line("Wasted literals", s.wasted_literals);
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("c ======================================================================");
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
#[cfg(not(target_env = "msvc"))]
fn memory_usage() -> Option<(f64, f64)> {
    use tikv_jemalloc_ctl::{epoch, stats};

    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

#[cfg(target_env = "msvc")]
fn memory_usage() -> Option<(f64, f64)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_with_escaped_newlines() {
        let cnf = parse_text("1 -2 0\\n2 3 0").unwrap();
        assert_eq!(cnf.clauses, vec![vec![1, -2], vec![2, 3]]);
    }

    #[test]
    fn test_parse_text_with_comments_and_header() {
        let cnf = parse_text("c comment\np cnf 3 2\n1 0\n-2 3 0\n").unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.clauses, vec![vec![1], vec![-2, 3]]);
    }

    #[test]
    fn test_parse_text_rejects_garbage() {
        assert!(parse_text("1 x 0").is_err());
    }

    #[test]
    fn test_cli_global_path() {
        let cli = Cli::try_parse_from(["cdcl-sat", "problem.cnf", "--verbose"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("problem.cnf")));
        assert!(cli.command.is_none());
        assert!(cli.common.verbose);
    }

    #[test]
    fn test_cli_options_map_to_solver_options() {
        let cli = Cli::try_parse_from([
            "cdcl-sat",
            "file",
            "--path",
            "x.cnf",
            "--restart-policy",
            "geometric",
            "--minimization",
            "recursive",
            "--restart-first",
            "50",
            "--time-limit",
            "5",
        ])
        .unwrap();
        let Some(Commands::File { path, common }) = cli.command else {
            panic!("expected the file subcommand");
        };
        assert_eq!(path, PathBuf::from("x.cnf"));
        assert_eq!(common.time_limit, Some(5));

        let options = common.solver_options();
        assert_eq!(options.restart_policy, RestarterType::Geometric);
        assert_eq!(options.minimization, MinimizationType::Recursive);
        assert_eq!(options.restart_first, 50);
        assert!((options.var_decay - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_solve_and_report_text() {
        let cnf = parse_text("1 2 0\n-1 2 0\n-1 -2 0").unwrap();
        let common = CommonOptions {
            verify: true,
            print_model: true,
            ..CommonOptions::default()
        };
        let interrupt = Interrupt::new();
        assert_eq!(
            solve_and_report(&cnf, &common, None, Duration::ZERO, &interrupt).unwrap(),
            SolveStatus::Satisfiable
        );

        let cnf = parse_text("1 0\n-1 0").unwrap();
        assert_eq!(
            solve_and_report(&cnf, &common, None, Duration::ZERO, &interrupt).unwrap(),
            SolveStatus::Unsatisfiable
        );
    }

    fn pigeonhole(pigeons: i32, holes: i32) -> Cnf {
        let var = |p: i32, h: i32| p * holes + h + 1;
        let mut cnf = Cnf::new((pigeons * holes) as usize);
        for p in 0..pigeons {
            cnf.add_clause((0..holes).map(|h| var(p, h)));
        }
        for h in 0..holes {
            for p in 0..pigeons {
                for q in p + 1..pigeons {
                    cnf.add_clause([-var(p, h), -var(q, h)]);
                }
            }
        }
        cnf
    }

    #[test]
    fn test_raised_interrupt_reports_indeterminate() {
        let interrupt = Interrupt::new();
        // what the signal handler does on SIGINT
        interrupt.raise();

        let common = CommonOptions {
            verbose: true,
            ..CommonOptions::default()
        };
        let status =
            solve_and_report(&pigeonhole(5, 4), &common, None, Duration::ZERO, &interrupt).unwrap();
        assert_eq!(status, SolveStatus::Indeterminate);
        assert_eq!(status.exit_code(), 0);
        assert!(interrupt.is_raised());
        assert_eq!(stop_reason(status, false, &interrupt), Some(Stop::Interrupt));
    }

    #[test]
    fn test_time_limit_reports_timeout_and_clears_flag() {
        let interrupt = Interrupt::new();
        let common = CommonOptions {
            time_limit: Some(1),
            ..CommonOptions::default()
        };
        let status =
            solve_and_report(&pigeonhole(12, 11), &common, None, Duration::ZERO, &interrupt)
                .unwrap();
        assert_eq!(status, SolveStatus::Indeterminate);
        assert!(!interrupt.is_raised());
    }

    #[test]
    fn test_stop_reason() {
        let interrupt = Interrupt::new();
        assert_eq!(stop_reason(SolveStatus::Indeterminate, true, &interrupt), Some(Stop::Timeout));
        assert_eq!(stop_reason(SolveStatus::Indeterminate, false, &interrupt), None);
        interrupt.raise();
        assert_eq!(stop_reason(SolveStatus::Satisfiable, false, &interrupt), None);
        assert_eq!(stop_reason(SolveStatus::Indeterminate, false, &interrupt), Some(Stop::Interrupt));
        assert_eq!(Stop::Interrupt.to_string(), "INTERRUPT");
    }

    #[test]
    fn test_verify_model_rejects_falsified_clause() {
        let cnf = parse_text("1 2 0\n-1 0\n-2 3 0").unwrap();
        assert!(verify_model(&cnf, &[-1, 2, 3]).is_ok());

        let err = verify_model(&cnf, &[-1, 2, -3]).unwrap_err();
        assert!(matches!(err, CliError::Verification { clause: 2 }));
        assert_eq!(
            err.to_string(),
            "model failed verification: clause 2 is not satisfied"
        );
    }

    #[test]
    fn test_watch_deadline_cancelled() {
        let (tx, rx) = mpsc::channel();
        let interrupt = Interrupt::new();
        drop(tx);
        assert!(!watch_deadline(&rx, Duration::from_secs(60), &interrupt));
        assert!(!interrupt.is_raised());
    }

    #[test]
    fn test_watch_deadline_expires() {
        let (_tx, rx) = mpsc::channel();
        let interrupt = Interrupt::new();
        assert!(watch_deadline(&rx, Duration::from_millis(1), &interrupt));
        assert!(interrupt.is_raised());
    }
}

//! # cdcl-sat
//!
//! Command-line front end of the solver. It reads formulas in DIMACS CNF
//! format and prints results in the SAT competition format:
//!
//! - `s SATISFIABLE`, `s UNSATISFIABLE` or `s INDETERMINATE`;
//! - with `--print-model`, the model as a `v ... 0` line;
//! - statistics as `c` comment lines when `--verbose` is given.
//!
//! The exit code is 10 for satisfiable, 20 for unsatisfiable, 0 when the time
//! limit was hit or SIGINT/SIGTERM stopped the search, and 1 when the input
//! could not be read or a model failed `--verify`.
//!
//! ```sh
//! cdcl-sat problem.cnf
//! cdcl-sat file --path problem.cnf --verbose --time-limit 60
//! cdcl-sat text --input "1 -2 0\n2 3 0" --print-model
//! cdcl-sat dir --path benchmarks/ --restart-policy geometric
//! cdcl-sat completions zsh
//! ```
//!
//! Library log records are written to stderr through `env_logger`; set
//! `RUST_LOG` (e.g. `RUST_LOG=restart=info,reduction=info`) to see them.

use crate::command_line::cli::{Cli, run};
use clap::Parser;
use std::process::ExitCode;

mod command_line;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(Some(status)) => ExitCode::from(status.exit_code()),
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("c error: {e}");
            ExitCode::from(1)
        }
    }
}

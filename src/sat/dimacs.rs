#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A reader for the DIMACS CNF format.
//!
//! - Lines starting with `c` are comments.
//! - `p cnf <num_variables> <num_clauses>` is the problem line.
//! - Every other line holds literals: non-zero integers, positive for a
//!   variable and negative for its negation. A `0` ends the current clause,
//!   so a clause may span several lines and a line may hold several clauses.
//! - A line starting with `%` ends the data (some benchmark sets append
//!   garbage after it).
//!
//! A clause count in the problem line that disagrees with the body is only
//! logged. Variables beyond the declared count grow the formula.

use crate::sat::cnf::Cnf;
use crate::sat::logging::targets;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: malformed problem line `{content}`")]
    InvalidHeader { line: usize, content: String },

    #[error("line {line}: `{token}` is not a literal")]
    InvalidLiteral { line: usize, token: String },

    #[error("line {line}: the last clause is not terminated by 0")]
    UnterminatedClause { line: usize },
}

fn parse_header(line: usize, content: &str) -> Result<(usize, usize), DimacsError> {
    let invalid = || DimacsError::InvalidHeader {
        line,
        content: content.to_owned(),
    };
    let mut parts = content.split_whitespace();
    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(invalid());
    }
    let mut count = || -> Result<usize, DimacsError> {
        parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid)
    };
    let vars = count()?;
    let clauses = count()?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((vars, clauses))
}

fn parse_literal(line: usize, token: &str) -> Result<i32, DimacsError> {
    token
        .parse::<i32>()
        .ok()
        .filter(|&lit| lit != i32::MIN)
        .ok_or_else(|| DimacsError::InvalidLiteral {
            line,
            token: token.to_owned(),
        })
}

/// Reads a formula in DIMACS format.
///
/// # Errors
///
/// If reading fails, the problem line is malformed, a token is not an
/// integer literal, or the input ends inside a clause.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut cnf = Cnf::default();
    let mut declared_clauses = None;
    let mut clause = Vec::new();
    let mut line_no = 0;

    for line in reader.lines() {
        let line = line?;
        line_no += 1;
        let trimmed = line.trim_start();

        match trimmed.chars().next() {
            None | Some('c') => continue,
            Some('%') => break,
            Some('p') => {
                let (vars, clauses) = parse_header(line_no, trimmed)?;
                cnf.num_vars = cnf.num_vars.max(vars);
                declared_clauses = Some(clauses);
                continue;
            }
            Some(_) => {}
        }

        for token in trimmed.split_whitespace() {
            match parse_literal(line_no, token)? {
                0 => cnf.add_clause(std::mem::take(&mut clause)),
                lit => clause.push(lit),
            }
        }
    }

    if !clause.is_empty() {
        return Err(DimacsError::UnterminatedClause { line: line_no });
    }

    match declared_clauses {
        Some(declared) if declared != cnf.len() => log::warn!(
            target: targets::DIMACS,
            "Problem line declares {declared} clauses but {} were read",
            cnf.len()
        ),
        None => log::warn!(target: targets::DIMACS, "No problem line found"),
        _ => {}
    }

    Ok(cnf)
}

/// Reads a DIMACS file.
///
/// # Errors
///
/// If the file cannot be opened, or for any error of [`parse_dimacs`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf, DimacsError> {
    let file = File::open(path)?;
    parse_dimacs(BufReader::new(file))
}

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A formula in conjunctive normal form, kept in DIMACS terms.
//!
//! Literals are non-zero signed integers: `v` for variable `v` and `-v` for
//! its negation, with variables numbered from 1. This is the form formulas are
//! read in and checked against; the solver converts to its own encoding when
//! the clauses are loaded.

use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A formula as a list of clauses over `num_vars` variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Number of variables. Every literal's variable is at most this.
    pub num_vars: usize,
    pub clauses: Vec<Vec<i32>>,
}

impl Cnf {
    #[must_use]
    pub const fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Appends a clause, growing `num_vars` to cover its literals.
    ///
    /// # Panics
    ///
    /// If the clause contains `0`.
    pub fn add_clause(&mut self, clause: impl IntoIterator<Item = i32>) {
        let clause = clause.into_iter().collect_vec();
        assert!(
            !clause.contains(&0),
            "0 is a clause terminator, not a literal: {clause:?}"
        );
        if let Some(max) = clause.iter().map(|l| l.unsigned_abs() as usize).max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.push(clause);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec<i32>> {
        self.clauses.iter()
    }

    /// Total number of literal occurrences.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Vec::len).sum()
    }

    /// Checks that `model` satisfies every clause.
    ///
    /// `model` holds signed literals; a variable without an entry counts as
    /// unassigned and satisfies nothing.
    #[must_use]
    pub fn verify(&self, model: &[i32]) -> bool {
        self.first_falsified(model).is_none()
    }

    /// Index of the first clause `model` does not satisfy.
    #[must_use]
    pub fn first_falsified(&self, model: &[i32]) -> Option<usize> {
        let mut values = vec![None; self.num_vars + 1];
        for &lit in model {
            let var = lit.unsigned_abs() as usize;
            if var < values.len() {
                values[var] = Some(lit > 0);
            }
        }
        self.clauses.iter().position(|clause| {
            !clause
                .iter()
                .any(|&lit| values[lit.unsigned_abs() as usize] == Some(lit > 0))
        })
    }
}

impl From<Vec<Vec<i32>>> for Cnf {
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        let mut cnf = Self::default();
        for clause in clauses {
            cnf.add_clause(clause);
        }
        cnf
    }
}

impl Display for Cnf {
    /// Writes the formula in DIMACS format.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

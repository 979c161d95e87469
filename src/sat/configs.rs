//! Solver tunables.

use crate::sat::restarter::{RestarterImpls, RestarterType};
use clap::ValueEnum;
use std::fmt::Display;

/// How much effort conflict analysis spends shrinking the learnt clause.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum MinimizationType {
    /// Keep the first-UIP clause as derived
    None,
    /// Drop literals whose reason is covered by the clause (one level deep)
    #[default]
    Basic,
    /// Drop literals implied by the rest of the clause through any chain of reasons
    Recursive,
}

impl Display for MinimizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Basic => write!(f, "Basic"),
            Self::Recursive => write!(f, "Recursive"),
        }
    }
}

/// Every knob of the search.
///
/// The defaults are the classic MiniSat values.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    /// Conflict budget of the first run.
    pub restart_first: u64,
    /// Base of the Luby sequence, or the factor of the geometric schedule.
    pub restart_inc: f64,
    pub restart_policy: RestarterType,
    pub var_decay: f64,
    pub clause_decay: f64,
    /// Initial learnt clause budget as a fraction of the original clauses.
    pub learntsize_factor: f64,
    /// Growth factor of the learnt clause budget.
    pub learntsize_inc: f64,
    /// Conflicts in a run before the learnt budget grows for the first time.
    pub learntsize_adjust_start: f64,
    pub learntsize_adjust_inc: f64,
    /// Lower bound of the learnt clause budget.
    pub min_learnts: f64,
    pub minimization: MinimizationType,
    /// Conflicts between two updates of the published progress counters.
    pub progress_interval: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            restart_first: 100,
            restart_inc: 2.0,
            restart_policy: RestarterType::Luby,
            var_decay: 0.95,
            clause_decay: 0.999,
            learntsize_factor: 0.3,
            learntsize_inc: 1.1,
            learntsize_adjust_start: 100.0,
            learntsize_adjust_inc: 1.5,
            min_learnts: 0.0,
            minimization: MinimizationType::Basic,
            progress_interval: 1_000,
        }
    }
}

impl SolverOptions {
    #[must_use]
    pub const fn restarter(&self) -> RestarterImpls {
        self.restart_policy
            .to_impl(self.restart_first, self.restart_inc)
    }
}

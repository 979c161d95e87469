#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The public face of a solver: its outcome type, statistics and the two
//! handles other threads may hold while a solve is running.
//!
//! A solve runs on one thread and owns all of its state. The only things
//! shared with other threads are an [`Interrupt`] flag (written from outside,
//! polled by the search) and a [`Progress`] block (written by the search,
//! read from outside).

use crate::sat::assignment::LBool;
use crate::sat::cnf::Cnf;
use crate::sat::configs::SolverOptions;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Outcome of a call to `solve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Satisfiable,
    Unsatisfiable,
    /// The search was interrupted before reaching an answer.
    Indeterminate,
}

impl SolveStatus {
    /// Conventional SAT competition exit code.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Satisfiable => 10,
            Self::Unsatisfiable => 20,
            Self::Indeterminate => 0,
        }
    }

    #[must_use]
    pub const fn is_sat(self) -> bool {
        matches!(self, Self::Satisfiable)
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Indeterminate => write!(f, "INDETERMINATE"),
        }
    }
}

/// Counters collected during solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub restarts: u64,
    /// Number of learnt clause database reductions.
    pub reduce_dbs: u64,
    /// Learnt clauses deleted by reductions.
    pub removed_clauses: u64,
    /// Original clauses currently stored.
    pub original_clauses: usize,
    /// Learnt clauses currently stored.
    pub learnt_clauses: usize,
    pub unit_learnts: u64,
    pub binary_learnts: u64,
    /// Learnt clauses with an LBD of at most 2.
    pub glue_learnts: u64,
    /// Literals of learnt clauses before minimisation.
    pub max_literals: u64,
    /// Literals of learnt clauses after minimisation.
    pub tot_literals: u64,
    /// Literals held by freed clauses.
    pub wasted_literals: usize,
}

/// Cooperative cancellation flag.
///
/// Cloning yields another handle to the same flag. The search checks it
/// between steps and returns [`SolveStatus::Indeterminate`] once raised.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[must_use]
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Default)]
struct ProgressCounters {
    restarts: AtomicU64,
    conflicts: AtomicU64,
    decisions: AtomicU64,
    propagations: AtomicU64,
    reduce_dbs: AtomicU64,
    learnts: AtomicU64,
    binary_learnts: AtomicU64,
    unit_learnts: AtomicU64,
    num_vars: AtomicU64,
}

/// A consistent-enough copy of the published counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub restarts: u64,
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub reduce_dbs: u64,
    pub learnts: u64,
    pub binary_learnts: u64,
    pub unit_learnts: u64,
    pub num_vars: u64,
}

/// Read-only window onto a running search.
///
/// The solver publishes its counters every few conflicts, at every restart
/// and when a solve ends. Nothing in the search depends on them being read.
#[derive(Debug, Clone, Default)]
pub struct Progress(Arc<ProgressCounters>);

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let c = &self.0;
        ProgressSnapshot {
            restarts: c.restarts.load(Ordering::Relaxed),
            conflicts: c.conflicts.load(Ordering::Relaxed),
            decisions: c.decisions.load(Ordering::Relaxed),
            propagations: c.propagations.load(Ordering::Relaxed),
            reduce_dbs: c.reduce_dbs.load(Ordering::Relaxed),
            learnts: c.learnts.load(Ordering::Relaxed),
            binary_learnts: c.binary_learnts.load(Ordering::Relaxed),
            unit_learnts: c.unit_learnts.load(Ordering::Relaxed),
            num_vars: c.num_vars.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn publish(&self, stats: &SolutionStats, num_vars: usize) {
        let c = &self.0;
        c.restarts.store(stats.restarts, Ordering::Relaxed);
        c.conflicts.store(stats.conflicts, Ordering::Relaxed);
        c.decisions.store(stats.decisions, Ordering::Relaxed);
        c.propagations.store(stats.propagations, Ordering::Relaxed);
        c.reduce_dbs.store(stats.reduce_dbs, Ordering::Relaxed);
        c.learnts.store(stats.learnt_clauses as u64, Ordering::Relaxed);
        c.binary_learnts.store(stats.binary_learnts, Ordering::Relaxed);
        c.unit_learnts.store(stats.unit_learnts, Ordering::Relaxed);
        c.num_vars.store(num_vars as u64, Ordering::Relaxed);
    }
}

/// Common interface of SAT solvers.
pub trait Solver {
    /// Builds a solver loaded with every clause of `cnf`.
    fn from_cnf(cnf: &Cnf, options: SolverOptions) -> Self
    where
        Self: Sized;

    fn solve(&mut self) -> SolveStatus;

    /// One value per variable after a satisfiable solve, empty otherwise.
    fn model(&self) -> &[LBool];

    fn stats(&self) -> SolutionStats;
}

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Restart strategies.
//!
//! The search runs in a sequence of bounded runs. Before each run the driver
//! asks its [`Restarter`] for a conflict budget; once the run exceeds it, the
//! solver backtracks to the root and starts the next run. Learnt clauses,
//! activities and saved phases all survive a restart, so a restart only
//! throws away the current decisions.
//!
//! This module provides:
//! - `Luby`: budgets `first * luby(inc, i)`, where with `inc = 2` the
//!   multipliers follow the Luby sequence 1, 1, 2, 1, 1, 2, 4, ...
//! - `Geometric`: budgets `first * inc^i`.
//! - `Never`: a single unbounded run.

use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// Trait defining the interface for restart strategies.
pub trait Restarter: Debug + Clone {
    /// Conflict budget of the run with index `run` (0-based), `None` if the
    /// run is unbounded.
    fn budget(&self, run: usize) -> Option<u64>;
}

/// Finite subsequences of the Luby sequence.
///
/// Returns `y^k`, where `k` is the exponent the Luby sequence assigns to
/// index `x`. For `y = 2` this is 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, ...
#[must_use]
pub fn luby(y: f64, mut x: usize) -> f64 {
    let mut size = 1_usize;
    let mut seq = 0_i32;
    while size < x + 1 {
        seq += 1;
        size = 2 * size + 1;
    }
    while size - 1 != x {
        size = (size - 1) >> 1;
        seq -= 1;
        x %= size;
    }
    y.powi(seq)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scaled(first: u64, factor: f64) -> u64 {
    (first as f64 * factor) as u64
}

/// Restarts on a Luby schedule scaled by a base interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Luby {
    first: u64,
    inc: f64,
}

impl Luby {
    #[must_use]
    pub const fn new(first: u64, inc: f64) -> Self {
        Self { first, inc }
    }
}

impl Restarter for Luby {
    fn budget(&self, run: usize) -> Option<u64> {
        Some(scaled(self.first, luby(self.inc, run)))
    }
}

/// Restarts with geometrically growing intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometric {
    first: u64,
    inc: f64,
}

impl Geometric {
    #[must_use]
    pub const fn new(first: u64, inc: f64) -> Self {
        Self { first, inc }
    }
}

impl Restarter for Geometric {
    fn budget(&self, run: usize) -> Option<u64> {
        let exp = i32::try_from(run).unwrap_or(i32::MAX);
        Some(scaled(self.first, self.inc.powi(exp)))
    }
}

/// Never restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Never;

impl Restarter for Never {
    fn budget(&self, _run: usize) -> Option<u64> {
        None
    }
}

/// Possible restarter implementations.
#[derive(Debug, Clone, PartialEq)]
pub enum RestarterImpls {
    Luby(Luby),
    Geometric(Geometric),
    Never(Never),
}

impl Default for RestarterImpls {
    fn default() -> Self {
        Self::Luby(Luby::new(100, 2.0))
    }
}

impl Restarter for RestarterImpls {
    fn budget(&self, run: usize) -> Option<u64> {
        match self {
            Self::Luby(r) => r.budget(run),
            Self::Geometric(r) => r.budget(run),
            Self::Never(r) => r.budget(run),
        }
    }
}

/// Enum representing the restart strategy to use.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum RestarterType {
    /// Luby sequence restarts
    #[default]
    Luby,
    /// Geometrically growing restart intervals
    Geometric,
    /// No restarts
    Never,
}

impl Display for RestarterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Luby => write!(f, "Luby"),
            Self::Geometric => write!(f, "Geometric"),
            Self::Never => write!(f, "Never"),
        }
    }
}

impl RestarterType {
    /// Builds the concrete restarter for a base interval and growth factor.
    #[must_use]
    pub const fn to_impl(self, first: u64, inc: f64) -> RestarterImpls {
        match self {
            Self::Luby => RestarterImpls::Luby(Luby::new(first, inc)),
            Self::Geometric => RestarterImpls::Geometric(Geometric::new(first, inc)),
            Self::Never => RestarterImpls::Never(Never),
        }
    }
}

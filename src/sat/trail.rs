#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The assignment trail.
//!
//! Literals are appended in the order they become true and are only ever
//! removed from the tail. `trail_lim[d]` is the trail length at the moment
//! decision level `d + 1` was opened, so the number of entries in `trail_lim`
//! is the current decision level. The trail is the only writer of the
//! [`Assignment`] table.

use crate::sat::assignment::{Assignment, LBool};
use crate::sat::clause_storage::ClauseRef;
use crate::sat::literal::{Literal, Variable};
use crate::sat::logging::targets;
use crate::sat::phase_saving::SavedPhases;
use crate::sat::variable_selection::Vsids;
use std::ops::Index;

/// Why and when a variable got its value. Meaningful only while the variable
/// is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VarData {
    /// The clause that implied the value, `None` for decisions and top-level
    /// units.
    pub reason: Option<ClauseRef>,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    assigns: Assignment,
    trail: Vec<Literal>,
    trail_lim: Vec<usize>,
    /// Next trail entry to propagate.
    qhead: usize,
    var_data: Vec<VarData>,
}

impl Index<usize> for Trail {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.trail[index]
    }
}

impl Trail {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_variable(&mut self) {
        self.assigns.push_variable();
        self.var_data.push(VarData::default());
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.assigns.len()
    }

    #[must_use]
    #[inline]
    pub fn value(&self, lit: Literal) -> LBool {
        self.assigns.literal_value(lit)
    }

    #[must_use]
    #[inline]
    pub fn var_value(&self, var: Variable) -> LBool {
        self.assigns.var_value(var)
    }

    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assigns
    }

    /// Makes `lit` true at the current decision level.
    ///
    /// # Panics
    ///
    /// If the variable of `lit` already has a value.
    pub fn enqueue(&mut self, lit: Literal, reason: Option<ClauseRef>) {
        let current = self.value(lit);
        assert!(
            current.is_undef(),
            "cannot assign {lit:?} at level {}: literal is already {current:?} (reason {:?})",
            self.decision_level(),
            self.var_data[lit.variable() as usize].reason,
        );

        self.assigns.assign(lit);
        self.var_data[lit.variable() as usize] = VarData {
            reason,
            level: self.decision_level(),
        };
        self.trail.push(lit);
    }

    #[must_use]
    #[inline]
    pub fn decision_level(&self) -> u32 {
        self.trail_lim.len() as u32
    }

    pub fn new_decision_level(&mut self) {
        self.trail_lim.push(self.trail.len());
    }

    /// Trail position where `level` starts.
    #[must_use]
    pub fn level_start(&self, level: u32) -> usize {
        if level == 0 {
            0
        } else {
            self.trail_lim[level as usize - 1]
        }
    }

    #[must_use]
    #[inline]
    pub fn level(&self, var: Variable) -> u32 {
        self.var_data[var as usize].level
    }

    #[must_use]
    #[inline]
    pub fn reason(&self, var: Variable) -> Option<ClauseRef> {
        self.var_data[var as usize].reason
    }

    #[must_use]
    pub fn var_data(&self, var: Variable) -> VarData {
        self.var_data[var as usize]
    }

    /// Forgets the reason of `var`, whose reason clause is being removed.
    pub(crate) fn clear_reason(&mut self, var: Variable) {
        self.var_data[var as usize].reason = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Literal] {
        &self.trail
    }

    #[must_use]
    pub const fn qhead(&self) -> usize {
        self.qhead
    }

    /// Next literal waiting for propagation, advancing the queue head.
    pub(crate) fn next_to_propagate(&mut self) -> Option<Literal> {
        let lit = self.trail.get(self.qhead).copied()?;
        self.qhead += 1;
        Some(lit)
    }

    /// Drops the rest of the propagation queue after a conflict.
    pub(crate) fn flush_queue(&mut self) {
        self.qhead = self.trail.len();
    }

    #[must_use]
    pub fn fully_propagated(&self) -> bool {
        self.qhead == self.trail.len()
    }

    /// Undoes every assignment above `level`.
    ///
    /// Each unassigned variable keeps its last polarity in `phases` and is
    /// queued for decisions again. Does nothing if the solver is already at
    /// or below `level`.
    pub fn backtrack_to(&mut self, level: u32, phases: &mut SavedPhases, vsids: &mut Vsids) {
        if self.decision_level() <= level {
            return;
        }

        let start = self.trail_lim[level as usize];
        log::trace!(
            target: targets::BACKTRACK,
            "Backtracking from level {} to {level}, undoing {} assignments",
            self.decision_level(),
            self.trail.len() - start
        );

        for &lit in self.trail[start..].iter().rev() {
            let var = lit.variable();
            self.assigns.unassign(var);
            phases.save(lit);
            vsids.insert(var);
        }

        self.qhead = start;
        self.trail.truncate(start);
        self.trail_lim.truncate(level as usize);
    }
}

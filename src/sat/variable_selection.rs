#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! VSIDS decision heuristic.
//!
//! Activities live in an [`ActivityHeap`]. Instead of decaying every
//! activity after each conflict, the bump increment grows by `1 / decay`;
//! when an activity passes [`RESCALE_LIMIT`] all activities and the
//! increment are scaled down together.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;
use crate::sat::vsids::ActivityHeap;
use bit_vec::BitVec;

/// Activity above which every variable activity is rescaled.
pub const RESCALE_LIMIT: f64 = 1e100;

#[derive(Debug, Clone, PartialEq)]
pub struct Vsids {
    heap: ActivityHeap,
    var_inc: f64,
    var_decay: f64,
    /// Variables allowed to be branched on.
    decision: BitVec,
}

impl Default for Vsids {
    fn default() -> Self {
        Self::new(0.95)
    }
}

impl Vsids {
    #[must_use]
    pub fn new(var_decay: f64) -> Self {
        Self {
            heap: ActivityHeap::new(),
            var_inc: 1.0,
            var_decay,
            decision: BitVec::new(),
        }
    }

    /// Registers `var` (the next variable index) and queues it if `decision`.
    pub fn add_variable(&mut self, var: Variable, decision: bool) {
        debug_assert_eq!(var as usize, self.decision.len());
        self.heap.reserve_var(var);
        self.decision.push(false);
        self.set_decision_var(var, decision);
    }

    pub fn set_decision_var(&mut self, var: Variable, eligible: bool) {
        self.decision.set(var as usize, eligible);
        self.insert(var);
    }

    #[must_use]
    pub fn is_decision_var(&self, var: Variable) -> bool {
        self.decision.get(var as usize).unwrap_or(false)
    }

    /// Queues `var` again if it is eligible and not queued yet.
    #[inline]
    pub fn insert(&mut self, var: Variable) {
        if self.is_decision_var(var) && !self.heap.contains(var) {
            self.heap.push(var);
        }
    }

    pub fn bump(&mut self, var: Variable) {
        if self.heap.add_activity(var, self.var_inc) > RESCALE_LIMIT {
            self.heap.scale_all(1.0 / RESCALE_LIMIT);
            self.var_inc /= RESCALE_LIMIT;
        }
        if self.heap.contains(var) {
            self.heap.decrease(var);
        }
    }

    #[inline]
    pub fn decay(&mut self) {
        self.var_inc /= self.var_decay;
    }

    /// Pops variables until an unassigned decision variable comes up.
    ///
    /// Popped assigned variables are reinserted when they are unassigned on
    /// backtrack.
    pub fn pick(&mut self, assignment: &Assignment) -> Option<Variable> {
        while let Some(var) = self.heap.remove_min() {
            if !assignment.is_assigned(var) && self.is_decision_var(var) {
                return Some(var);
            }
        }
        None
    }

    /// Requeues every unassigned decision variable.
    pub fn rebuild(&mut self, assignment: &Assignment) {
        for var in 0..self.decision.len() as Variable {
            if !assignment.is_assigned(var) {
                self.insert(var);
            }
        }
    }

    #[must_use]
    pub fn activity(&self, var: Variable) -> f64 {
        self.heap.activity(var)
    }

    #[must_use]
    pub const fn var_inc(&self) -> f64 {
        self.var_inc
    }

    #[must_use]
    pub const fn heap(&self) -> &ActivityHeap {
        &self.heap
    }

    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        self.heap.contains(var)
    }
}

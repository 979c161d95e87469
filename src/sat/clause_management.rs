#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The clause database.
//!
//! [`ClauseDatabase`] owns the clause allocator, the watch lists and the two
//! clause sets (original and learnt). It is responsible for:
//! - attaching and detaching clauses to their two watch lists,
//! - bumping and decaying learnt clause activities,
//! - periodically removing low-activity learnt clauses (`reduce`),
//! - removing clauses satisfied at the root and trimming root-false literals
//!   from the rest (`remove_satisfied`).
//!
//! Every removal path detaches the clause before freeing it, and clears it as
//! a reason if it is currently the reason of an assignment.

use crate::sat::clause::Clause;
use crate::sat::clause_storage::{ClauseAllocator, ClauseRef};
use crate::sat::literal::{Literal, Variable};
use crate::sat::logging::targets;
use crate::sat::trail::Trail;
use crate::sat::watch::{WatchLists, Watcher};
use ordered_float::OrderedFloat;

/// Clause activity above which every learnt clause activity is rescaled.
pub const RESCALE_LIMIT: f64 = 1e20;

#[derive(Debug, Clone)]
pub struct ClauseDatabase {
    pub(crate) ca: ClauseAllocator,
    pub(crate) watches: WatchLists,
    clauses: Vec<ClauseRef>,
    learnts: Vec<ClauseRef>,
    cla_inc: f64,
    clause_decay: f64,
    clause_literals: usize,
    learnt_literals: usize,
}

impl Default for ClauseDatabase {
    fn default() -> Self {
        Self::new(0.999)
    }
}

impl ClauseDatabase {
    #[must_use]
    pub fn new(clause_decay: f64) -> Self {
        Self {
            ca: ClauseAllocator::new(),
            watches: WatchLists::default(),
            clauses: Vec::new(),
            learnts: Vec::new(),
            cla_inc: 1.0,
            clause_decay,
            clause_literals: 0,
            learnt_literals: 0,
        }
    }

    /// Makes room in the watch lists for both literals of `var`.
    pub fn init_var(&mut self, var: Variable) {
        self.watches.init_var(var);
    }

    /// Stores and watches a clause of the input formula.
    ///
    /// The literals must be free of duplicates and have at least two entries,
    /// the first two being unassigned.
    pub fn add_original(&mut self, literals: &[Literal]) -> ClauseRef {
        let cref = self.ca.alloc(literals, false);
        self.attach(cref);
        self.clauses.push(cref);
        cref
    }

    /// Stores and watches a learnt clause, then bumps its activity.
    pub fn add_learnt(&mut self, literals: &[Literal], lbd: u32) -> ClauseRef {
        let cref = self.ca.alloc(literals, true);
        self.ca.get_mut(cref).set_lbd(lbd);
        self.attach(cref);
        self.learnts.push(cref);
        self.bump(cref);
        cref
    }

    /// Adds a watcher for each of the first two literals of `cref`.
    ///
    /// # Panics
    ///
    /// If the clause has fewer than two literals.
    pub fn attach(&mut self, cref: ClauseRef) {
        let clause = self.ca.get(cref);
        assert!(
            clause.len() >= 2,
            "cannot watch {cref}: clause has {} literals",
            clause.len()
        );
        let (first, second) = (clause[0], clause[1]);
        let len = clause.len();
        if clause.is_learnt() {
            self.learnt_literals += len;
        } else {
            self.clause_literals += len;
        }
        self.watches.append(!first, Watcher::new(cref, second));
        self.watches.append(!second, Watcher::new(cref, first));
    }

    /// Removes both watchers of `cref`.
    ///
    /// # Panics
    ///
    /// If the clause has fewer than two literals, or a watcher is missing.
    pub fn detach(&mut self, cref: ClauseRef) {
        let clause = self.ca.get(cref);
        assert!(
            clause.len() > 1,
            "cannot detach {cref}: clause has {} literals",
            clause.len()
        );
        let (first, second) = (clause[0], clause[1]);
        let len = clause.len();
        if clause.is_learnt() {
            self.learnt_literals -= len;
        } else {
            self.clause_literals -= len;
        }
        self.watches.remove(!first, cref);
        self.watches.remove(!second, cref);
    }

    /// `true` if `cref` is the reason of its first literal's current value.
    #[must_use]
    pub fn locked(&self, cref: ClauseRef, trail: &Trail) -> bool {
        let first = self.ca.get(cref)[0];
        trail.value(first).is_true() && trail.reason(first.variable()) == Some(cref)
    }

    /// Detaches and frees `cref`, clearing it as a reason first if needed.
    ///
    /// Does not touch the clause sets; callers filter them.
    pub fn remove_clause(&mut self, cref: ClauseRef, trail: &mut Trail) {
        self.detach(cref);
        if self.locked(cref, trail) {
            trail.clear_reason(self.ca.get(cref)[0].variable());
        }
        self.ca.free(cref);
    }

    /// `true` if any literal of the clause is currently true.
    #[must_use]
    pub fn satisfied(clause: &Clause, trail: &Trail) -> bool {
        clause.iter().any(|&lit| trail.value(lit).is_true())
    }

    /// Increases the activity of a learnt clause, rescaling every learnt
    /// clause activity when it grows past [`RESCALE_LIMIT`].
    pub fn bump(&mut self, cref: ClauseRef) {
        let clause = self.ca.get_mut(cref);
        clause.bump_activity(self.cla_inc);
        if clause.activity() > RESCALE_LIMIT {
            log::debug!(target: targets::CLAUSE_DB, "Rescaling clause activities");
            for &learnt in &self.learnts {
                self.ca.get_mut(learnt).scale_activity(1.0 / RESCALE_LIMIT);
            }
            self.cla_inc /= RESCALE_LIMIT;
        }
    }

    #[inline]
    pub fn decay(&mut self) {
        self.cla_inc /= self.clause_decay;
    }

    /// Removes about half of the learnt clauses.
    ///
    /// Learnt clauses are ordered by activity with binary clauses last; a
    /// clause is removed if it is longer than two literals, not locked, and
    /// either in the lower half or less active than `cla_inc / learnts`.
    /// Returns the number of clauses removed.
    pub fn reduce(&mut self, trail: &mut Trail) -> usize {
        let ca = &self.ca;
        self.learnts.sort_by_key(|&cref| {
            let clause = ca.get(cref);
            if clause.len() > 2 {
                (false, OrderedFloat(clause.activity()))
            } else {
                (true, OrderedFloat(0.0))
            }
        });

        let total = self.learnts.len();
        #[allow(clippy::cast_precision_loss)]
        let limit = self.cla_inc / total as f64;

        let learnts = std::mem::take(&mut self.learnts);
        let mut kept = Vec::with_capacity(total);
        let mut removed = 0;
        for (i, cref) in learnts.into_iter().enumerate() {
            let clause = self.ca.get(cref);
            if clause.len() > 2
                && !self.locked(cref, trail)
                && (i < total / 2 || clause.activity() < limit)
            {
                self.remove_clause(cref, trail);
                removed += 1;
            } else {
                kept.push(cref);
            }
        }
        self.learnts = kept;

        log::info!(
            target: targets::REDUCTION,
            "Removed {removed} of {total} learnt clauses (wasted literals: {})",
            self.ca.wasted()
        );
        removed
    }

    /// Root-level cleanup of both clause sets.
    ///
    /// Satisfied clauses are removed. In the others, every false literal past
    /// the two watched positions is dropped in place. Returns the number of
    /// clauses removed.
    ///
    /// # Panics
    ///
    /// If called above decision level 0, or if a surviving clause has an
    /// assigned watched literal (propagation did not reach a fixpoint).
    pub fn remove_satisfied(&mut self, trail: &mut Trail) -> usize {
        assert_eq!(
            trail.decision_level(),
            0,
            "root simplification above the root level"
        );
        let learnts = std::mem::take(&mut self.learnts);
        let clauses = std::mem::take(&mut self.clauses);
        let mut removed = 0;
        self.learnts = self.remove_satisfied_from(learnts, trail, &mut removed);
        self.clauses = self.remove_satisfied_from(clauses, trail, &mut removed);
        log::info!(
            target: targets::CLAUSE_DB,
            "Root simplification removed {removed} clauses ({} original, {} learnt left)",
            self.clauses.len(),
            self.learnts.len()
        );
        removed
    }

    fn remove_satisfied_from(
        &mut self,
        crefs: Vec<ClauseRef>,
        trail: &mut Trail,
        removed: &mut usize,
    ) -> Vec<ClauseRef> {
        let mut kept = Vec::with_capacity(crefs.len());
        for cref in crefs {
            if Self::satisfied(self.ca.get(cref), trail) {
                self.remove_clause(cref, trail);
                *removed += 1;
                continue;
            }

            let clause = self.ca.get_mut(cref);
            assert!(
                trail.value(clause[0]).is_undef() && trail.value(clause[1]).is_undef(),
                "watched literals of {cref} are assigned at the root: {:?} = {:?}, {:?} = {:?}",
                clause[0],
                trail.value(clause[0]),
                clause[1],
                trail.value(clause[1]),
            );
            let before = clause.len();
            let mut k = 2;
            while k < clause.len() {
                if trail.value(clause[k]).is_false() {
                    clause[k] = clause.last();
                    clause.pop();
                } else {
                    k += 1;
                }
            }
            let trimmed = before - clause.len();
            if clause.is_learnt() {
                self.learnt_literals -= trimmed;
            } else {
                self.clause_literals -= trimmed;
            }
            kept.push(cref);
        }
        kept
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn num_learnts(&self) -> usize {
        self.learnts.len()
    }

    /// Literals held by attached original and learnt clauses.
    #[must_use]
    pub const fn num_literals(&self) -> usize {
        self.clause_literals + self.learnt_literals
    }

    #[must_use]
    pub fn clauses(&self) -> &[ClauseRef] {
        &self.clauses
    }

    #[must_use]
    pub fn learnts(&self) -> &[ClauseRef] {
        &self.learnts
    }

    #[must_use]
    pub const fn allocator(&self) -> &ClauseAllocator {
        &self.ca
    }

    #[must_use]
    pub const fn watches(&self) -> &WatchLists {
        &self.watches
    }

    #[must_use]
    pub const fn cla_inc(&self) -> f64 {
        self.cla_inc
    }

    /// Checks that every attached clause is watched exactly once by the
    /// negation of each of its first two literals, and that no watcher points
    /// at a freed clause.
    #[must_use]
    pub fn watches_consistent(&self) -> bool {
        let watched = self.clauses.iter().chain(&self.learnts).all(|&cref| {
            let clause = self.ca.get(cref);
            clause.len() >= 2
                && self.watches.count(!clause[0], cref) == 1
                && self.watches.count(!clause[1], cref) == 1
        });
        let attached = self.clauses.len() + self.learnts.len();
        watched
            && self.watches.iter().count() == 2 * attached
            && self.watches.iter().all(|(_, w)| self.ca.is_live(w.cref))
    }
}

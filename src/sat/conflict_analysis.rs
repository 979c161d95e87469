#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! First-UIP conflict analysis.
//!
//! Starting from a falsified clause, the analysis resolves backwards along
//! the trail until exactly one literal of the current decision level is left
//! (the first unique implication point). Literals of lower levels are
//! collected into the learnt clause as they are met. Every variable met on
//! the way has its activity bumped, as has every learnt clause used as a
//! reason.
//!
//! The learnt clause is then minimised according to [`MinimizationType`],
//! the literal of the highest remaining level is moved to position 1, and
//! that level is the backtrack level.

use crate::sat::clause_management::ClauseDatabase;
use crate::sat::clause_storage::ClauseRef;
use crate::sat::configs::MinimizationType;
use crate::sat::literal::{Literal, Variable};
use crate::sat::logging::targets;
use crate::sat::trail::Trail;
use crate::sat::variable_selection::Vsids;
use bit_vec::BitVec;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Literal storage of a freshly learnt clause.
pub type LearntLiterals = SmallVec<[Literal; 16]>;

/// A learnt clause of at least two literals, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearntClause {
    /// Position 0 holds the asserting literal, position 1 a literal of the
    /// backtrack level.
    pub literals: LearntLiterals,
    pub backtrack_level: u32,
    pub lbd: u32,
}

/// Outcome of analysing a conflict above the root level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// The learnt clause has a single literal: backtrack to the root and
    /// assert it there.
    Unit(Literal),
    Learned(LearntClause),
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    seen: BitVec,
    learnt: Vec<Literal>,
    to_clear: Vec<Literal>,
    stack: Vec<Literal>,
    levels: FxHashSet<u32>,
    minimization: MinimizationType,
    /// Literals in first-UIP clauses before minimisation.
    pub max_literals: u64,
    /// Literals in learnt clauses after minimisation.
    pub tot_literals: u64,
}

#[inline]
const fn abstract_level(level: u32) -> u32 {
    1 << (level & 31)
}

impl Analyzer {
    #[must_use]
    pub fn new(minimization: MinimizationType) -> Self {
        Self {
            minimization,
            ..Self::default()
        }
    }

    pub fn push_variable(&mut self) {
        self.seen.push(false);
    }

    #[inline]
    fn seen(&self, var: Variable) -> bool {
        self.seen.get(var as usize).unwrap_or(false)
    }

    #[inline]
    fn mark(&mut self, var: Variable, value: bool) {
        self.seen.set(var as usize, value);
    }

    /// Derives the first-UIP clause of the conflict in `confl`.
    ///
    /// # Panics
    ///
    /// If called at the root level, or if the walk along the trail reaches a
    /// literal of the current level that has no reason.
    pub fn analyze(
        &mut self,
        confl: ClauseRef,
        trail: &Trail,
        db: &mut ClauseDatabase,
        vsids: &mut Vsids,
    ) -> Conflict {
        let level = trail.decision_level();
        assert!(level > 0, "conflict analysis at the root level");

        self.learnt.clear();
        // room for the asserting literal
        self.learnt.push(Literal::default());

        let mut path = 0_usize;
        let mut p: Option<Literal> = None;
        let mut index = trail.len();
        let mut reason = Some(confl);

        loop {
            let cref = reason.unwrap_or_else(|| {
                panic!(
                    "conflict analysis reached {p:?} at level {level} without a reason \
                     ({path} literals of the level left, trail position {index})"
                )
            });

            if db.ca.get(cref).is_learnt() {
                db.bump(cref);
            }

            let clause = db.ca.get(cref);
            let start = usize::from(p.is_some());
            for &q in &clause.as_slice()[start..] {
                let var = q.variable();
                let q_level = trail.level(var);
                if !self.seen(var) && q_level > 0 {
                    vsids.bump(var);
                    self.mark(var, true);
                    assert!(
                        q_level <= level,
                        "{q:?} in {cref} is assigned at level {q_level}, above the current level {level}"
                    );
                    if q_level == level {
                        path += 1;
                    } else {
                        self.learnt.push(q);
                    }
                }
            }

            let next = loop {
                index = index.checked_sub(1).unwrap_or_else(|| {
                    panic!("conflict analysis walked off the trail with {path} literals of level {level} left")
                });
                let lit = trail[index];
                if self.seen(lit.variable()) {
                    break lit;
                }
            };

            p = Some(next);
            reason = trail.reason(next.variable());
            self.mark(next.variable(), false);
            path = path.checked_sub(1).unwrap_or_else(|| {
                panic!("conflict in {confl} has no literal of the current level {level}")
            });
            if path == 0 {
                self.learnt[0] = !next;
                break;
            }
        }

        self.max_literals += self.learnt.len() as u64;
        self.to_clear.clear();
        self.to_clear.extend_from_slice(&self.learnt);
        match self.minimization {
            MinimizationType::None => {}
            MinimizationType::Basic => self.minimize_basic(trail, db),
            MinimizationType::Recursive => self.minimize_recursive(trail, db),
        }
        self.tot_literals += self.learnt.len() as u64;

        let backtrack_level = if self.learnt.len() == 1 {
            0
        } else {
            let mut max = 1;
            for i in 2..self.learnt.len() {
                if trail.level(self.learnt[i].variable()) > trail.level(self.learnt[max].variable()) {
                    max = i;
                }
            }
            self.learnt.swap(1, max);
            trail.level(self.learnt[1].variable())
        };

        for i in 0..self.to_clear.len() {
            let var = self.to_clear[i].variable();
            self.mark(var, false);
        }

        if self.learnt.len() == 1 {
            log::debug!(target: targets::ANALYSIS, "Learnt unit {:?}", self.learnt[0]);
            return Conflict::Unit(self.learnt[0]);
        }

        let lbd = self.lbd(trail);
        log::debug!(
            target: targets::ANALYSIS,
            "Learnt {:?} (lbd {lbd}), backtracking to {backtrack_level}",
            self.learnt
        );
        Conflict::Learned(LearntClause {
            literals: LearntLiterals::from_slice(&self.learnt),
            backtrack_level,
            lbd,
        })
    }

    /// Number of distinct decision levels in the current learnt clause.
    fn lbd(&mut self, trail: &Trail) -> u32 {
        self.levels.clear();
        for lit in &self.learnt {
            self.levels.insert(trail.level(lit.variable()));
        }
        self.levels.len() as u32
    }

    /// Drops a literal if every other literal of its reason is already in the
    /// clause or fixed at the root.
    fn minimize_basic(&mut self, trail: &Trail, db: &ClauseDatabase) {
        let mut kept = 1;
        for i in 1..self.learnt.len() {
            let lit = self.learnt[i];
            let keep = trail.reason(lit.variable()).is_none_or(|cref| {
                db.ca.get(cref).as_slice()[1..].iter().any(|&q| {
                    !self.seen(q.variable()) && trail.level(q.variable()) > 0
                })
            });
            if keep {
                self.learnt[kept] = lit;
                kept += 1;
            }
        }
        self.learnt.truncate(kept);
    }

    /// Drops a literal if it is implied by the other literals of the clause
    /// through any chain of reasons.
    fn minimize_recursive(&mut self, trail: &Trail, db: &ClauseDatabase) {
        let levels = self.learnt[1..]
            .iter()
            .fold(0, |acc, lit| acc | abstract_level(trail.level(lit.variable())));

        let mut kept = 1;
        for i in 1..self.learnt.len() {
            let lit = self.learnt[i];
            let keep = trail.reason(lit.variable()).is_none()
                || !self.redundant(lit, levels, trail, db);
            if keep {
                self.learnt[kept] = lit;
                kept += 1;
            }
        }
        self.learnt.truncate(kept);
    }

    /// `true` if `lit` follows from seen literals and root facts alone.
    ///
    /// Variables proven redundant on the way stay marked and are recorded in
    /// `to_clear`; on failure the marks made by this call are undone.
    fn redundant(&mut self, lit: Literal, levels: u32, trail: &Trail, db: &ClauseDatabase) -> bool {
        self.stack.clear();
        self.stack.push(lit);
        let top = self.to_clear.len();

        while let Some(q) = self.stack.pop() {
            let Some(cref) = trail.reason(q.variable()) else {
                panic!("{q:?} is on the minimisation stack without a reason");
            };
            let clause = db.ca.get(cref);
            for &l in &clause.as_slice()[1..] {
                let var = l.variable();
                if self.seen(var) || trail.level(var) == 0 {
                    continue;
                }
                if trail.reason(var).is_some() && abstract_level(trail.level(var)) & levels != 0 {
                    self.mark(var, true);
                    self.stack.push(l);
                    self.to_clear.push(l);
                } else {
                    for j in top..self.to_clear.len() {
                        let var = self.to_clear[j].variable();
                        self.mark(var, false);
                    }
                    self.to_clear.truncate(top);
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::propagation::propagate;

    /// A solver skeleton without the search loop.
    struct Fixture {
        trail: Trail,
        db: ClauseDatabase,
        vsids: Vsids,
        analyzer: Analyzer,
    }

    impl Fixture {
        fn new(num_vars: u32, minimization: MinimizationType) -> Self {
            let mut f = Self {
                trail: Trail::new(),
                db: ClauseDatabase::new(0.999),
                vsids: Vsids::new(0.95),
                analyzer: Analyzer::new(minimization),
            };
            for var in 0..num_vars {
                f.trail.new_variable();
                f.db.init_var(var);
                f.vsids.add_variable(var, true);
                f.analyzer.push_variable();
            }
            f
        }

        fn add(&mut self, xs: &[i32]) -> ClauseRef {
            let lits: Vec<Literal> = xs.iter().copied().map(Literal::from).collect();
            self.db.add_original(&lits)
        }

        fn decide(&mut self, x: i32) -> Option<ClauseRef> {
            self.trail.new_decision_level();
            self.trail.enqueue(Literal::from(x), None);
            let mut props = 0;
            propagate(&mut self.trail, &mut self.db.ca, &mut self.db.watches, &mut props)
        }

        fn analyze(&mut self, confl: ClauseRef) -> Conflict {
            self.analyzer
                .analyze(confl, &self.trail, &mut self.db, &mut self.vsids)
        }
    }

    fn dimacs(lits: &[Literal]) -> Vec<i32> {
        lits.iter().map(|l| l.to_i32()).collect()
    }

    #[test]
    fn test_first_uip_learns_unit() {
        // x1 -> x2, x1 -> x3, (x2 & x3) -> false
        let mut f = Fixture::new(3, MinimizationType::Basic);
        f.add(&[-1, 2]);
        f.add(&[-1, 3]);
        f.add(&[-2, -3]);

        let confl = f.decide(1).unwrap_or(ClauseRef::UNDEF);
        assert_ne!(confl, ClauseRef::UNDEF);

        assert_eq!(f.analyze(confl), Conflict::Unit(Literal::from(-1)));
        assert!(f.analyzer.seen.none());
    }

    #[test]
    fn test_backtrack_level_is_second_highest() {
        let mut f = Fixture::new(5, MinimizationType::Basic);
        f.add(&[-3, 4]);
        f.add(&[-1, -3, 5]);
        f.add(&[-2, -4, -5]);

        assert_eq!(f.decide(1), None);
        assert_eq!(f.decide(2), None);
        let confl = f.decide(3).unwrap_or(ClauseRef::UNDEF);
        assert_ne!(confl, ClauseRef::UNDEF);

        let Conflict::Learned(learnt) = f.analyze(confl) else {
            panic!("expected a learnt clause");
        };
        let lits = dimacs(&learnt.literals);
        assert_eq!(lits[0], -3);
        assert_eq!(lits.len(), 3);
        assert!(lits.contains(&-1) && lits.contains(&-2));
        assert_eq!(lits[1], -2);
        assert_eq!(learnt.backtrack_level, 2);
        assert_eq!(learnt.lbd, 3);
        assert!(f.analyzer.seen.none());
    }

    #[test]
    fn test_activity_bumped_for_met_variables() {
        let mut f = Fixture::new(3, MinimizationType::None);
        f.add(&[-1, 2]);
        f.add(&[-1, 3]);
        f.add(&[-2, -3]);
        let confl = f.decide(1).unwrap_or(ClauseRef::UNDEF);
        let _ = f.analyze(confl);

        for var in 0..3 {
            assert!(f.vsids.activity(var) > 0.0);
        }
    }

    /// x1@1, x2@2, x3 forced by (-2 v 3), x4@3, conflict needs both x3 and
    /// x2 at the lower levels; x3 is implied by x2, so minimisation drops it.
    fn redundant_literal_fixture(minimization: MinimizationType) -> LearntClause {
        let mut f = Fixture::new(5, minimization);
        f.add(&[-2, 3]);
        f.add(&[-4, 5]);
        f.add(&[-1, -2, -3, -4, -5]);

        assert_eq!(f.decide(1), None);
        assert_eq!(f.decide(2), None);
        let confl = f.decide(4).unwrap_or(ClauseRef::UNDEF);
        assert_ne!(confl, ClauseRef::UNDEF);
        let Conflict::Learned(learnt) = f.analyze(confl) else {
            panic!("expected a learnt clause");
        };
        assert!(f.analyzer.seen.none());
        learnt
    }

    #[test]
    fn test_no_minimization_keeps_implied_literal() {
        let learnt = redundant_literal_fixture(MinimizationType::None);
        let mut lits = dimacs(&learnt.literals);
        assert_eq!(lits[0], -4);
        lits.sort_unstable();
        assert_eq!(lits, vec![-4, -3, -2, -1]);
    }

    #[test]
    fn test_basic_minimization_drops_implied_literal() {
        let learnt = redundant_literal_fixture(MinimizationType::Basic);
        let mut lits = dimacs(&learnt.literals);
        assert_eq!(lits[0], -4);
        lits.sort_unstable();
        assert_eq!(lits, vec![-4, -2, -1]);
        assert_eq!(learnt.backtrack_level, 2);
    }

    #[test]
    fn test_recursive_minimization_follows_chains() {
        // x3 is implied by x2 through x6: (-2 v 6), (-6 v 3)
        let mut f = Fixture::new(6, MinimizationType::Recursive);
        f.add(&[-2, 6]);
        f.add(&[-6, 3]);
        f.add(&[-4, 5]);
        f.add(&[-1, -2, -3, -4, -5]);

        assert_eq!(f.decide(1), None);
        assert_eq!(f.decide(2), None);
        let confl = f.decide(4).unwrap_or(ClauseRef::UNDEF);
        let Conflict::Learned(learnt) = f.analyze(confl) else {
            panic!("expected a learnt clause");
        };
        let mut lits = dimacs(&learnt.literals);
        lits.sort_unstable();
        assert_eq!(lits, vec![-4, -2, -1]);
        assert!(f.analyzer.seen.none());
        assert!(f.analyzer.tot_literals < f.analyzer.max_literals);
    }

    #[test]
    #[should_panic(expected = "conflict analysis at the root level")]
    fn test_root_conflict_is_not_analysed() {
        let mut f = Fixture::new(2, MinimizationType::Basic);
        let c = f.add(&[1, 2]);
        let _ = f.analyze(c);
    }
}

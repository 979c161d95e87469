#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The CDCL search driver.
//!
//! [`Cdcl`] owns every piece of solver state and runs the search loop:
//! propagate; on a conflict learn a clause and backjump; otherwise restart,
//! simplify, reduce the learnt clause database or decide. The outer loop in
//! [`Cdcl::solve`] runs the search in bounded runs whose conflict budgets
//! come from the configured [`Restarter`].

use crate::sat::assignment::LBool;
use crate::sat::clause_management::ClauseDatabase;
use crate::sat::clause_storage::ClauseRef;
use crate::sat::cnf::Cnf;
use crate::sat::configs::SolverOptions;
use crate::sat::conflict_analysis::{Analyzer, Conflict};
use crate::sat::literal::{Literal, Variable};
use crate::sat::logging::targets;
use crate::sat::phase_saving::SavedPhases;
use crate::sat::propagation;
use crate::sat::restarter::{Restarter, RestarterImpls};
use crate::sat::solver::{Interrupt, Progress, SolutionStats, SolveStatus, Solver};
use crate::sat::trail::Trail;
use crate::sat::variable_selection::Vsids;
use crate::sat::watch::WatchLists;
use smallvec::SmallVec;

#[derive(Debug, Clone)]
pub struct Cdcl {
    options: SolverOptions,
    trail: Trail,
    db: ClauseDatabase,
    vsids: Vsids,
    phases: SavedPhases,
    analyzer: Analyzer,
    restarter: RestarterImpls,

    /// `false` once the clauses are known to be unsatisfiable.
    ok: bool,
    /// Result of the last solve, cleared whenever the formula changes.
    status: Option<SolveStatus>,
    model: Vec<LBool>,
    stats: SolutionStats,

    max_learnts: f64,
    learntsize_adjust_confl: f64,
    /// Trail length at the last root simplification.
    simp_db_assigns: Option<usize>,

    interrupt: Interrupt,
    progress: Progress,
}

impl Default for Cdcl {
    fn default() -> Self {
        Self::new(SolverOptions::default())
    }
}

impl Cdcl {
    #[must_use]
    pub fn new(options: SolverOptions) -> Self {
        Self {
            trail: Trail::new(),
            db: ClauseDatabase::new(options.clause_decay),
            vsids: Vsids::new(options.var_decay),
            phases: SavedPhases::default(),
            analyzer: Analyzer::new(options.minimization),
            restarter: options.restarter(),
            ok: true,
            status: None,
            model: Vec::new(),
            stats: SolutionStats::default(),
            max_learnts: 0.0,
            learntsize_adjust_confl: options.learntsize_adjust_start,
            simp_db_assigns: None,
            interrupt: Interrupt::new(),
            progress: Progress::new(),
            options,
        }
    }

    /// Creates a fresh variable, eligible for decisions.
    ///
    /// # Panics
    ///
    /// If the variable count no longer fits the literal encoding.
    pub fn new_variable(&mut self) -> Variable {
        let var = Variable::try_from(self.trail.num_vars())
            .ok()
            .filter(|&v| v < (1 << 31))
            .unwrap_or_else(|| panic!("too many variables: {}", self.trail.num_vars()));
        self.trail.new_variable();
        self.db.init_var(var);
        self.vsids.add_variable(var, true);
        self.phases.push_variable();
        self.analyzer.push_variable();
        self.status = None;
        var
    }

    /// Makes sure variables `0..num_vars` exist.
    pub fn reserve_variables(&mut self, num_vars: usize) {
        while self.num_vars() < num_vars {
            self.new_variable();
        }
    }

    /// Marks `var` as (in)eligible for decisions.
    pub fn set_decision_var(&mut self, var: Variable, eligible: bool) {
        self.vsids.set_decision_var(var, eligible);
    }

    /// Adds a clause of the problem.
    ///
    /// Duplicate literals and literals false at the root are dropped;
    /// satisfied and tautological clauses are ignored. An empty clause makes
    /// the solver unsatisfiable, a unit clause is asserted and propagated at
    /// once. Returns `false` iff the clauses are now known to be
    /// unsatisfiable.
    ///
    /// # Panics
    ///
    /// If called above the root level or with a literal over a variable that
    /// does not exist.
    pub fn add_clause(&mut self, literals: &[Literal]) -> bool {
        assert_eq!(
            self.trail.decision_level(),
            0,
            "clauses can only be added at the root level"
        );
        if let Some(lit) = literals
            .iter()
            .find(|lit| lit.variable() as usize >= self.num_vars())
        {
            panic!(
                "{lit:?} refers to an unknown variable ({} variables exist)",
                self.num_vars()
            );
        }
        if !self.ok {
            return false;
        }
        self.status = None;

        let mut lits: SmallVec<[Literal; 8]> = literals.iter().copied().collect();
        lits.sort_unstable();

        let mut kept: SmallVec<[Literal; 8]> = SmallVec::with_capacity(lits.len());
        let mut prev: Option<Literal> = None;
        for lit in lits {
            let value = self.trail.value(lit);
            if value.is_true() || prev == Some(!lit) {
                return true;
            }
            if !value.is_false() && prev != Some(lit) {
                kept.push(lit);
                prev = Some(lit);
            }
        }

        match kept.as_slice() {
            [] => self.ok = false,
            [unit] => {
                self.trail.enqueue(*unit, None);
                if self.propagate().is_some() {
                    self.ok = false;
                }
            }
            lits => {
                self.db.add_original(lits);
            }
        }
        self.ok
    }

    /// Adds a clause written as DIMACS integers, creating variables as needed.
    pub fn add_clause_dimacs(&mut self, clause: &[i32]) -> bool {
        let literals: SmallVec<[Literal; 8]> =
            clause.iter().map(|&i| Literal::from_i32(i)).collect();
        if let Some(max) = literals.iter().map(|l| l.variable() as usize + 1).max() {
            self.reserve_variables(max);
        }
        self.add_clause(&literals)
    }

    fn propagate(&mut self) -> Option<ClauseRef> {
        propagation::propagate(
            &mut self.trail,
            &mut self.db.ca,
            &mut self.db.watches,
            &mut self.stats.propagations,
        )
    }

    fn backtrack(&mut self, level: u32) {
        self.trail
            .backtrack_to(level, &mut self.phases, &mut self.vsids);
    }

    /// Removes satisfied clauses and false literals at the root level.
    ///
    /// Returns `false` if propagation at the root finds a conflict. Does
    /// nothing new if no assignment was added since the previous call.
    fn simplify(&mut self) -> bool {
        assert_eq!(
            self.trail.decision_level(),
            0,
            "simplification above the root level"
        );
        if !self.ok || self.propagate().is_some() {
            self.ok = false;
            return false;
        }
        if self.simp_db_assigns == Some(self.trail.len()) {
            return true;
        }

        let removed = self.db.remove_satisfied(&mut self.trail);
        self.stats.removed_clauses += removed as u64;
        self.vsids.rebuild(self.trail.assignment());
        self.simp_db_assigns = Some(self.trail.len());
        true
    }

    fn pick_branch_lit(&mut self) -> Option<Literal> {
        self.vsids
            .pick(self.trail.assignment())
            .map(|var| self.phases.decision_literal(var))
    }

    fn reduce_db(&mut self) {
        self.stats.reduce_dbs += 1;
        let removed = self.db.reduce(&mut self.trail);
        self.stats.removed_clauses += removed as u64;
    }

    fn learnt_budget_reached(&self) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let excess = self.db.num_learnts() as f64 - self.trail.len() as f64;
        self.db.num_learnts() > 0 && excess >= self.max_learnts
    }

    /// One bounded run of the search.
    ///
    /// Returns `True` when every variable is assigned without conflict,
    /// `False` on a root-level conflict and `Undef` when the run exceeded
    /// `budget` or the interrupt was raised. In the `Undef` case the solver
    /// is back at the root level.
    fn search(&mut self, budget: Option<u64>) -> LBool {
        assert!(self.ok, "search on a formula already known to be unsatisfiable");
        let mut conflicts = 0_u64;

        loop {
            if let Some(confl) = self.propagate() {
                self.stats.conflicts += 1;
                conflicts += 1;

                if self.trail.decision_level() == 0 {
                    log::debug!(target: targets::SEARCH, "Conflict in {confl} at the root level");
                    return LBool::False;
                }

                match self
                    .analyzer
                    .analyze(confl, &self.trail, &mut self.db, &mut self.vsids)
                {
                    Conflict::Unit(lit) => {
                        self.backtrack(0);
                        self.stats.unit_learnts += 1;
                        self.trail.enqueue(lit, None);
                    }
                    Conflict::Learned(learnt) => {
                        self.backtrack(learnt.backtrack_level);
                        if learnt.literals.len() == 2 {
                            self.stats.binary_learnts += 1;
                        }
                        if learnt.lbd <= 2 {
                            self.stats.glue_learnts += 1;
                        }
                        let cref = self.db.add_learnt(&learnt.literals, learnt.lbd);
                        self.trail.enqueue(learnt.literals[0], Some(cref));
                    }
                }

                self.vsids.decay();
                self.db.decay();

                #[allow(clippy::cast_precision_loss)]
                let run_conflicts = conflicts as f64;
                if run_conflicts >= self.learntsize_adjust_confl {
                    self.learntsize_adjust_confl *= self.options.learntsize_adjust_inc;
                    self.max_learnts *= self.options.learntsize_inc;
                }

                if self.options.progress_interval > 0
                    && self.stats.conflicts % self.options.progress_interval == 0
                {
                    self.publish_progress();
                }

                if self.interrupt.is_raised() {
                    self.backtrack(0);
                    return LBool::Undef;
                }
            } else {
                if budget.is_some_and(|b| conflicts > b) || self.interrupt.is_raised() {
                    self.backtrack(0);
                    return LBool::Undef;
                }

                if self.trail.decision_level() == 0 && !self.simplify() {
                    return LBool::False;
                }

                if self.learnt_budget_reached() {
                    self.reduce_db();
                }

                self.stats.decisions += 1;
                let Some(next) = self.pick_branch_lit() else {
                    return LBool::True;
                };
                self.trail.new_decision_level();
                log::trace!(
                    target: targets::SEARCH,
                    "Deciding {next:?} at level {}",
                    self.trail.decision_level()
                );
                self.trail.enqueue(next, None);
            }
        }
    }

    /// Searches for a model of the clauses added so far.
    ///
    /// After [`SolveStatus::Unsatisfiable`] every later call returns the
    /// same answer at once, as does a repeated call after
    /// [`SolveStatus::Satisfiable`] while no clause or variable was added.
    /// [`SolveStatus::Indeterminate`] leaves the solver usable at the root
    /// level.
    pub fn solve(&mut self) -> SolveStatus {
        if !self.ok {
            return SolveStatus::Unsatisfiable;
        }
        if let Some(status) = self.status {
            return status;
        }

        self.model.clear();
        #[allow(clippy::cast_precision_loss)]
        let clauses = self.db.num_clauses() as f64;
        self.max_learnts = (clauses * self.options.learntsize_factor).max(self.options.min_learnts);
        self.learntsize_adjust_confl = self.options.learntsize_adjust_start;

        log::info!(
            target: targets::SEARCH,
            "Solving {} variables, {} clauses ({} literals)",
            self.num_vars(),
            self.db.num_clauses(),
            self.db.num_literals()
        );

        let mut run = 0;
        let result = loop {
            let budget = self.restarter.budget(run);
            match self.search(budget) {
                LBool::Undef if self.interrupt.is_raised() => break LBool::Undef,
                LBool::Undef => {
                    self.stats.restarts += 1;
                    run += 1;
                    log::info!(
                        target: targets::RESTART,
                        "Restart {} after {} conflicts ({} learnt clauses, budget {:.0})",
                        self.stats.restarts,
                        self.stats.conflicts,
                        self.db.num_learnts(),
                        self.max_learnts
                    );
                    self.publish_progress();
                }
                done => break done,
            }
        };

        let status = match result {
            LBool::True => {
                self.model = self.trail.assignment().as_slice().to_vec();
                SolveStatus::Satisfiable
            }
            LBool::False => {
                self.ok = false;
                SolveStatus::Unsatisfiable
            }
            LBool::Undef => SolveStatus::Indeterminate,
        };
        self.backtrack(0);
        if status != SolveStatus::Indeterminate {
            self.status = Some(status);
        }
        self.publish_progress();
        log::info!(target: targets::SEARCH, "Search finished: {status}");
        status
    }

    fn publish_progress(&self) {
        self.progress.publish(&self.stats(), self.num_vars());
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.trail.num_vars()
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.db.num_clauses()
    }

    #[must_use]
    pub fn num_learnts(&self) -> usize {
        self.db.num_learnts()
    }

    /// `false` once the clauses are known to be unsatisfiable.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.ok
    }

    /// The model of the last satisfiable solve, one value per variable.
    #[must_use]
    pub fn model(&self) -> &[LBool] {
        &self.model
    }

    /// The model as signed 1-based integers.
    #[must_use]
    pub fn model_dimacs(&self) -> Vec<i32> {
        self.model
            .iter()
            .enumerate()
            .map(|(i, value)| {
                #[allow(clippy::cast_possible_truncation)]
                let lit = Literal::new(i as Variable, !value.is_false());
                lit.to_i32()
            })
            .collect()
    }

    /// The value of `var` in the model, `Undef` if there is none.
    #[must_use]
    pub fn value_of(&self, var: Variable) -> LBool {
        self.model.get(var as usize).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn stats(&self) -> SolutionStats {
        let mut stats = self.stats;
        stats.original_clauses = self.db.num_clauses();
        stats.learnt_clauses = self.db.num_learnts();
        stats.max_literals = self.analyzer.max_literals;
        stats.tot_literals = self.analyzer.tot_literals;
        stats.wasted_literals = self.db.allocator().wasted();
        stats
    }

    /// A handle that stops a running solve once raised.
    #[must_use]
    pub fn interrupt(&self) -> Interrupt {
        self.interrupt.clone()
    }

    /// Replaces the interrupt flag, e.g. to share one flag between solvers.
    pub fn set_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt = interrupt;
    }

    /// A handle to the counters published while solving.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress.clone()
    }

    #[must_use]
    pub const fn options(&self) -> &SolverOptions {
        &self.options
    }

    #[must_use]
    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    #[must_use]
    pub const fn clause_database(&self) -> &ClauseDatabase {
        &self.db
    }

    #[must_use]
    pub const fn watches(&self) -> &WatchLists {
        self.db.watches()
    }

    #[must_use]
    pub const fn vsids(&self) -> &Vsids {
        &self.vsids
    }
}

impl Solver for Cdcl {
    fn from_cnf(cnf: &Cnf, options: SolverOptions) -> Self {
        let mut solver = Self::new(options);
        solver.reserve_variables(cnf.num_vars);
        for clause in &cnf.clauses {
            if !solver.add_clause_dimacs(clause) {
                break;
            }
        }
        solver
    }

    fn solve(&mut self) -> SolveStatus {
        Self::solve(self)
    }

    fn model(&self) -> &[LBool] {
        Self::model(self)
    }

    fn stats(&self) -> SolutionStats {
        Self::stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::configs::MinimizationType;
    use crate::sat::restarter::RestarterType;

    fn solver_with(num_vars: usize, clauses: &[&[i32]]) -> Cdcl {
        let mut solver = Cdcl::default();
        solver.reserve_variables(num_vars);
        for clause in clauses {
            solver.add_clause_dimacs(clause);
        }
        solver
    }

    fn satisfies(model: &[LBool], clauses: &[&[i32]]) -> bool {
        clauses.iter().all(|clause| {
            clause.iter().any(|&i| {
                let lit = Literal::from_i32(i);
                model[lit.variable() as usize] == LBool::from_bool(lit.polarity())
            })
        })
    }

    fn pigeonhole(pigeons: i32, holes: i32) -> Vec<Vec<i32>> {
        let var = |p: i32, h: i32| p * holes + h + 1;
        let mut clauses = Vec::new();
        for p in 0..pigeons {
            clauses.push((0..holes).map(|h| var(p, h)).collect());
        }
        for h in 0..holes {
            for p in 0..pigeons {
                for q in p + 1..pigeons {
                    clauses.push(vec![-var(p, h), -var(q, h)]);
                }
            }
        }
        clauses
    }

    #[test]
    fn test_new_variable_is_sequential() {
        let mut solver = Cdcl::default();
        assert_eq!(solver.new_variable(), 0);
        assert_eq!(solver.new_variable(), 1);
        assert_eq!(solver.num_vars(), 2);
        assert!(solver.vsids().contains(0));
        assert_eq!(solver.watches().len(), 4);
    }

    #[test]
    fn test_add_clause_drops_tautology_and_duplicates() {
        let mut solver = solver_with(3, &[]);
        assert!(solver.add_clause_dimacs(&[1, -1, 2]));
        assert_eq!(solver.num_clauses(), 0);

        assert!(solver.add_clause_dimacs(&[1, 2, 1, 3]));
        assert_eq!(solver.num_clauses(), 1);
        let cref = solver.clause_database().clauses()[0];
        assert_eq!(solver.clause_database().allocator().get(cref).len(), 3);
    }

    #[test]
    fn test_add_clause_unit_propagates() {
        let mut solver = solver_with(2, &[&[-1, 2]]);
        assert!(solver.add_clause_dimacs(&[1]));
        assert_eq!(solver.trail().var_value(0), LBool::True);
        assert_eq!(solver.trail().var_value(1), LBool::True);

        // satisfied at the root, never stored
        assert!(solver.add_clause_dimacs(&[2, 3]));
        assert_eq!(solver.num_clauses(), 1);
    }

    #[test]
    fn test_add_clause_removes_false_literals() {
        let mut solver = solver_with(3, &[&[-1]]);
        assert!(solver.add_clause_dimacs(&[1, 2, 3]));
        let cref = solver.clause_database().clauses()[0];
        let lits = solver.clause_database().allocator().get(cref).as_slice().to_vec();
        assert_eq!(lits, vec![Literal::positive(1), Literal::positive(2)]);
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        let mut solver = solver_with(1, &[]);
        assert!(!solver.add_clause(&[]));
        assert!(!solver.is_ok());
        assert_eq!(solver.solve(), SolveStatus::Unsatisfiable);
    }

    #[test]
    fn test_contradicting_units() {
        let mut solver = solver_with(1, &[&[1]]);
        assert!(!solver.add_clause_dimacs(&[-1]));
        assert_eq!(solver.solve(), SolveStatus::Unsatisfiable);
        assert!(solver.model().is_empty());
    }

    #[test]
    fn test_small_sat() {
        let clauses: &[&[i32]] = &[&[1, 2], &[-1, 2], &[-1, -2]];
        let mut solver = solver_with(2, clauses);
        assert_eq!(solver.solve(), SolveStatus::Satisfiable);
        assert_eq!(solver.value_of(0), LBool::False);
        assert_eq!(solver.value_of(1), LBool::True);
        assert_eq!(solver.model_dimacs(), vec![-1, 2]);
        assert_eq!(solver.trail().decision_level(), 0);
    }

    #[test]
    fn test_first_decision_is_negative() {
        let clauses: &[&[i32]] = &[&[1, 2, 3]];
        let mut solver = solver_with(3, clauses);
        assert_eq!(solver.solve(), SolveStatus::Satisfiable);
        assert!(satisfies(solver.model(), clauses));
        assert_eq!(solver.model().iter().filter(|v| v.is_false()).count(), 2);
    }

    #[test]
    fn test_pigeonhole_unsat_all_minimizations() {
        for minimization in [
            MinimizationType::None,
            MinimizationType::Basic,
            MinimizationType::Recursive,
        ] {
            let options = SolverOptions {
                minimization,
                ..SolverOptions::default()
            };
            let cnf = Cnf::from(pigeonhole(5, 4));
            let mut solver = Cdcl::from_cnf(&cnf, options);
            assert_eq!(solver.solve(), SolveStatus::Unsatisfiable, "{minimization}");
            assert!(solver.stats().conflicts > 0);
        }
    }

    #[test]
    fn test_restart_policies_agree() {
        let clauses = pigeonhole(4, 4);
        for policy in [RestarterType::Luby, RestarterType::Geometric, RestarterType::Never] {
            let options = SolverOptions {
                restart_policy: policy,
                restart_first: 2,
                ..SolverOptions::default()
            };
            let cnf = Cnf::from(clauses.clone());
            let mut solver = Cdcl::from_cnf(&cnf, options);
            assert_eq!(solver.solve(), SolveStatus::Satisfiable, "{policy}");
            assert!(cnf.verify(&solver.model_dimacs()));
        }
    }

    #[test]
    fn test_learnt_database_is_reduced_and_restarted() {
        let cnf = Cnf::from(pigeonhole(8, 7));
        let mut solver = Cdcl::from_cnf(&cnf, SolverOptions::default());
        #[allow(clippy::cast_precision_loss)]
        let initial_budget = solver.num_clauses() as f64 * solver.options().learntsize_factor;

        assert_eq!(solver.solve(), SolveStatus::Unsatisfiable);
        let stats = solver.stats();
        assert!(stats.restarts > 0);
        assert!(stats.reduce_dbs > 0);
        assert!(stats.removed_clauses > 0);
        assert!(solver.max_learnts > initial_budget);
        assert!(solver.learntsize_adjust_confl > solver.options().learntsize_adjust_start);
        assert!(solver.clause_database().watches_consistent());
    }

    #[test]
    fn test_large_learnt_floor_disables_reduction() {
        let options = SolverOptions {
            min_learnts: 1e9,
            ..SolverOptions::default()
        };
        let mut solver = Cdcl::from_cnf(&Cnf::from(pigeonhole(6, 5)), options);
        assert_eq!(solver.solve(), SolveStatus::Unsatisfiable);
        assert_eq!(solver.stats().reduce_dbs, 0);
        assert!(solver.stats().conflicts > 0);
    }

    #[test]
    fn test_learnt_budget_needs_a_learnt_clause() {
        let mut solver = solver_with(3, &[&[1, 2, 3]]);
        solver.max_learnts = 0.0;
        assert!(!solver.learnt_budget_reached());

        solver
            .db
            .add_learnt(&[Literal::from(1), Literal::from(2)], 2);
        assert!(solver.learnt_budget_reached());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let clauses: &[&[i32]] = &[&[1, 2], &[-1, 3], &[-2, -3]];
        let mut solver = solver_with(3, clauses);
        assert_eq!(solver.solve(), SolveStatus::Satisfiable);
        let model = solver.model().to_vec();
        let stats = solver.stats();
        assert_eq!(solver.solve(), SolveStatus::Satisfiable);
        assert_eq!(solver.model(), model.as_slice());
        assert_eq!(solver.stats(), stats);
    }

    #[test]
    fn test_interrupt_before_solve() {
        let cnf = Cnf::from(pigeonhole(5, 4));
        let mut solver = Cdcl::from_cnf(&cnf, SolverOptions::default());
        solver.interrupt().raise();
        assert_eq!(solver.solve(), SolveStatus::Indeterminate);
        assert_eq!(solver.trail().decision_level(), 0);
        assert!(solver.is_ok());

        solver.interrupt().reset();
        assert_eq!(solver.solve(), SolveStatus::Unsatisfiable);
    }

    #[test]
    fn test_progress_published_at_end() {
        let cnf = Cnf::from(pigeonhole(4, 3));
        let mut solver = Cdcl::from_cnf(&cnf, SolverOptions::default());
        let progress = solver.progress();
        assert_eq!(solver.solve(), SolveStatus::Unsatisfiable);
        let snap = progress.snapshot();
        assert_eq!(snap.conflicts, solver.stats().conflicts);
        assert_eq!(snap.num_vars, 12);
    }

    #[test]
    fn test_watches_consistent_after_solve() {
        let cnf = Cnf::from(pigeonhole(5, 5));
        let mut solver = Cdcl::from_cnf(&cnf, SolverOptions::default());
        assert_eq!(solver.solve(), SolveStatus::Satisfiable);
        assert!(solver.clause_database().watches_consistent());
        assert!(solver.vsids().heap().is_valid());
    }

    #[test]
    fn test_ineligible_variable_is_left_unassigned() {
        let mut solver = solver_with(3, &[&[1, 2]]);
        solver.set_decision_var(2, false);
        assert_eq!(solver.solve(), SolveStatus::Satisfiable);
        assert_eq!(solver.value_of(2), LBool::Undef);
        assert_eq!(solver.model_dimacs()[2], 3);
    }

    #[test]
    #[should_panic(expected = "unknown variable")]
    fn test_add_clause_unknown_variable_panics() {
        let mut solver = solver_with(1, &[]);
        solver.add_clause(&[Literal::positive(4)]);
    }
}

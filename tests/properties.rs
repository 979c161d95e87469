//! Property-based tests of solver soundness and of the structural invariants
//! of the heap, the watch lists and the trail.

mod common;

use cdcl_sat::sat::cdcl::Cdcl;
use cdcl_sat::sat::cnf::Cnf;
use cdcl_sat::sat::configs::{MinimizationType, SolverOptions};
use cdcl_sat::sat::literal::{Literal, Variable};
use cdcl_sat::sat::phase_saving::SavedPhases;
use cdcl_sat::sat::solver::{SolveStatus, Solver};
use cdcl_sat::sat::trail::Trail;
use cdcl_sat::sat::variable_selection::Vsids;
use cdcl_sat::sat::vsids::ActivityHeap;
use common::{brute_force_sat, solve_checked};
use proptest::prelude::*;

/// Formulas over at most `max_vars` variables with clauses of 1 to 4 literals.
fn formula(max_vars: i32, max_clauses: usize) -> impl Strategy<Value = Cnf> {
    (1..=max_vars).prop_flat_map(move |vars| {
        let literal = (1..=vars, any::<bool>()).prop_map(|(v, pos)| if pos { v } else { -v });
        prop::collection::vec(prop::collection::vec(literal, 1..=4), 1..=max_clauses).prop_map(
            move |clauses| {
                let mut cnf = Cnf::new(vars as usize);
                for clause in clauses {
                    cnf.add_clause(clause);
                }
                cnf
            },
        )
    })
}

fn minimization() -> impl Strategy<Value = MinimizationType> {
    prop_oneof![
        Just(MinimizationType::None),
        Just(MinimizationType::Basic),
        Just(MinimizationType::Recursive),
    ]
}

#[derive(Debug, Clone)]
enum HeapOp {
    Bump(Variable, f64),
    RemoveMin,
    Push(Variable),
}

fn heap_op(vars: Variable) -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        3 => (0..vars, 0.0_f64..1e6).prop_map(|(v, inc)| HeapOp::Bump(v, inc)),
        1 => Just(HeapOp::RemoveMin),
        1 => (0..vars).prop_map(HeapOp::Push),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_sat_models_satisfy_every_clause(cnf in formula(30, 120), min in minimization()) {
        let options = SolverOptions { minimization: min, restart_first: 5, ..SolverOptions::default() };
        // `solve_checked` verifies the model of a satisfiable result.
        let (status, _) = solve_checked(&cnf, options);
        prop_assert_ne!(status, SolveStatus::Indeterminate);
    }

    #[test]
    fn prop_unsat_agrees_with_brute_force(cnf in formula(12, 80), min in minimization()) {
        let options = SolverOptions { minimization: min, ..SolverOptions::default() };
        let (status, _) = solve_checked(&cnf, options);
        prop_assert_eq!(status == SolveStatus::Satisfiable, brute_force_sat(&cnf));
    }

    #[test]
    fn prop_watches_consistent_after_search(cnf in formula(40, 170)) {
        let options = SolverOptions { restart_first: 3, min_learnts: 2.0, ..SolverOptions::default() };
        let mut solver = Cdcl::from_cnf(&cnf, options);
        solver.solve();
        prop_assert!(solver.clause_database().watches_consistent());
        prop_assert!(solver.vsids().heap().is_valid());
        prop_assert_eq!(solver.trail().decision_level(), 0);
    }

    #[test]
    fn prop_heap_order_survives_random_ops(ops in prop::collection::vec(heap_op(16), 0..200)) {
        let mut heap = ActivityHeap::new();
        for var in 0..16 {
            heap.reserve_var(var);
            heap.push(var);
        }
        for op in ops {
            match op {
                HeapOp::Bump(var, inc) => {
                    heap.add_activity(var, inc);
                    if heap.contains(var) {
                        heap.decrease(var);
                    }
                }
                HeapOp::RemoveMin => {
                    heap.remove_min();
                }
                HeapOp::Push(var) => {
                    if !heap.contains(var) {
                        heap.push(var);
                    }
                }
            }
            prop_assert!(heap.is_valid());
        }

        let mut last = f64::INFINITY;
        while let Some(var) = heap.remove_min() {
            prop_assert!(heap.activity(var) <= last);
            last = heap.activity(var);
        }
    }

    #[test]
    fn prop_backtrack_restores_state(
        roots in prop::collection::vec((0_u32..10, any::<bool>()), 0..6),
        decided in prop::collection::vec((0_u32..10, any::<bool>()), 1..6),
    ) {
        let mut trail = Trail::new();
        let mut phases = SavedPhases::default();
        let mut vsids = Vsids::default();
        for var in 0..10 {
            trail.new_variable();
            phases.push_variable();
            vsids.add_variable(var, true);
        }
        for (var, pos) in roots {
            if trail.var_value(var).is_undef() {
                trail.enqueue(Literal::new(var, pos), None);
            }
        }

        let before_trail = trail.as_slice().to_vec();
        let before_values = trail.assignment().clone();
        let before_heap: Vec<bool> = (0..10).map(|v| vsids.contains(v)).collect();

        for (var, pos) in decided {
            if trail.var_value(var).is_undef() {
                trail.new_decision_level();
                trail.enqueue(Literal::new(var, pos), None);
            }
        }
        trail.backtrack_to(0, &mut phases, &mut vsids);

        prop_assert_eq!(trail.decision_level(), 0);
        prop_assert_eq!(trail.as_slice(), before_trail.as_slice());
        prop_assert_eq!(trail.assignment(), &before_values);
        let after_heap: Vec<bool> = (0..10).map(|v| vsids.contains(v)).collect();
        prop_assert_eq!(after_heap, before_heap);
    }
}
